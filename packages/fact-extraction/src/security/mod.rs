//! SSRF protection for user-supplied URLs.

mod url_validator;

pub use url_validator::UrlValidator;
