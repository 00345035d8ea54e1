//! SSRF-hardened HTTP fetcher.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};
use url::Url;

use super::PageFetcher;
use crate::error::{FetchError, FetchResult};
use crate::security::UrlValidator;
use crate::types::{config::FetchLimits, page::FetchedPage};

const MAX_REDIRECTS: usize = 5;

/// HTTP fetcher that validates every URL, including redirect hops, before
/// any connection is made.
///
/// Redirect hops get the literal checks only, since the redirect policy is
/// synchronous. Once a redirect chain has settled, the final URL is
/// re-resolved, and a page whose final host resolves into a blocked range
/// is discarded unread.
///
/// # Example
///
/// ```rust,ignore
/// use fact_extraction::{FetchLimits, HttpFetcher, PageFetcher};
///
/// let fetcher = HttpFetcher::new("FactExtractionBot/1.0")?;
/// let page = fetcher.fetch("https://example.com/ir/", &FetchLimits::default()).await?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    validator: UrlValidator,
    resolve_dns: bool,
}

impl HttpFetcher {
    /// Create a fetcher with default security rules.
    pub fn new(user_agent: &str) -> FetchResult<Self> {
        Self::with_validator(user_agent, UrlValidator::new())
    }

    /// Create a fetcher with a custom validator.
    pub fn with_validator(user_agent: &str, validator: UrlValidator) -> FetchResult<Self> {
        let redirect_validator = validator.clone();
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if redirect_validator.validate_url(attempt.url()).is_err() {
                attempt.stop()
            } else {
                attempt.follow()
            }
        });

        // Resolved-address checks only hold when this process connects directly
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(policy)
            .no_proxy()
            .build()
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            validator,
            resolve_dns: true,
        })
    }

    /// Skip the DNS rebinding check (literal-host checks still apply).
    pub fn without_dns_check(mut self) -> Self {
        self.resolve_dns = false;
        self
    }

    async fn fetch_validated(
        &self,
        url: &Url,
        limits: &FetchLimits,
    ) -> FetchResult<FetchedPage> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        if self.resolve_dns && final_url != *url {
            self.validator.validate_with_dns(&final_url).await?;
        }

        if let Some(length) = response.content_length() {
            if length > limits.max_bytes as u64 {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit: limits.max_bytes,
                    actual: length,
                });
            }
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        // Content-Length can be absent or wrong; enforce the cap while reading
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| map_reqwest_error(url, e))?
        {
            if body.len() + chunk.len() > limits.max_bytes {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit: limits.max_bytes,
                    actual: (body.len() + chunk.len()) as u64,
                });
            }
            body.extend_from_slice(&chunk);
        }

        let mut page = FetchedPage::new(url.as_str(), String::from_utf8_lossy(&body))
            .with_final_url(final_url.as_str());
        page.status = status.as_u16();
        page.content_type = content_type;
        page.fetched_at = Utc::now();
        Ok(page)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, limits: &FetchLimits) -> FetchResult<FetchedPage> {
        let parsed = self.validator.validate(url)?;
        if self.resolve_dns {
            self.validator.validate_with_dns(&parsed).await?;
        }

        debug!(url = %url, "HTTP fetch starting");
        let page = tokio::time::timeout(limits.timeout, self.fetch_validated(&parsed, limits))
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
            })?
            .inspect_err(|e| warn!(url = %url, error = %e, "HTTP fetch failed"))?;

        debug!(
            url = %url,
            final_url = %page.final_url,
            bytes = page.body.len(),
            "HTTP fetch complete"
        );
        Ok(page)
    }

    fn name(&self) -> &str {
        "http"
    }
}

fn map_reqwest_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http(Box::new(error))
    }
}
