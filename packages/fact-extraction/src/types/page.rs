//! Fetched page representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::html;
use crate::normalize::normalize_url;

/// A page body returned by a successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status: u16,

    /// Raw response body
    pub body: String,

    /// Content type header, if sent
    pub content_type: Option<String>,

    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Create a page whose final URL equals the requested one.
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            url,
            status: 200,
            body: body.into(),
            content_type: Some("text/html".to_string()),
            fetched_at: Utc::now(),
        }
    }

    /// Set the URL reached after redirects.
    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = final_url.into();
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Dedup key for this page.
    pub fn normalized_url(&self) -> String {
        normalize_url(&self.final_url)
    }

    /// Document title, if the body has one.
    pub fn title(&self) -> Option<String> {
        html::extract_title(&self.body)
    }

    /// True when the body looks like HTML or plain text.
    pub fn is_textual(&self) -> bool {
        match self.content_type.as_deref() {
            None => true,
            Some(ct) => {
                let ct = ct.to_ascii_lowercase();
                ct.contains("html") || ct.starts_with("text/")
            }
        }
    }
}
