//! Typed errors for the fact extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! blocked URL apart from a slow server or a malformed extractor reply.

use thiserror::Error;

/// Errors raised while turning a fetched page into facts.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The external extractor call failed
    #[error("extractor error: {0}")]
    Extractor(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The extractor reply was not valid JSON
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The extractor reply parsed but did not match the expected shape
    #[error("invalid extractor response: {reason}")]
    InvalidShape { reason: String },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Errors raised by a single page fetch.
///
/// Every variant is isolated to one URL; the crawler treats all of them as
/// "page unavailable".
#[derive(Debug, Error)]
pub enum FetchError {
    /// Security validation failed
    #[error("security error: {0}")]
    Security(#[from] SecurityError),

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The request did not complete within its timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Non-2xx response
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Body exceeded the configured size cap
    #[error("body of {url} exceeds {limit} bytes ({actual} seen)")]
    TooLarge { url: String, limit: usize, actual: u64 },

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Security-related errors, primarily for SSRF protection.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Host is blocked (e.g., localhost)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// IP in blocked CIDR range (e.g., 10.0.0.0/8)
    #[error("blocked IP range: {0}")]
    BlockedCidr(String),

    /// Administrative port (ssh, databases, ...)
    #[error("blocked port: {0}")]
    BlockedPort(u16),

    /// URL has no host
    #[error("URL has no host")]
    NoHost,

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    DnsResolution(String),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for security operations.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;
