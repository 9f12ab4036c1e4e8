//! HTTP client for public, unauthenticated profile pages.

mod url;

use std::sync::Arc;
use std::time::Duration;

use profilescan_core::{AccountRecord, AppConfig};
use reqwest::Client;

use crate::engagement::engagement_rate;
use crate::error::ScraperError;
use crate::extract::{MetadataExtractor, OpenGraphExtractor};

pub use url::encode_handle;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Redirect hops followed before giving up (login walls often redirect once or twice).
const MAX_REDIRECTS: usize = 10;

/// Fetches profile pages and turns them into [`AccountRecord`]s.
///
/// Each handle gets exactly one GET attempt. There is no retry or backoff:
/// a blocked or failed request is reported in the record's `error` field
/// and the caller decides what to do with it.
#[derive(Clone)]
pub struct ProfileClient {
    client: Client,
    base_url: String,
    extractor: Arc<dyn MetadataExtractor>,
}

impl std::fmt::Debug for ProfileClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ProfileClient {
    /// Creates a `ProfileClient` with the given timeout, `User-Agent`, and
    /// profile origin (e.g. `https://www.instagram.com`).
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidProfileUrl`] if `base_url` is not an absolute URL.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str, base_url: &str) -> Result<Self, ScraperError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        reqwest::Url::parse(&base_url).map_err(|e| ScraperError::InvalidProfileUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            extractor: Arc::new(OpenGraphExtractor),
        })
    }

    /// Builds a client from the `PROFILESCAN_*` settings.
    ///
    /// # Errors
    ///
    /// See [`ProfileClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            &config.profile_base_url,
        )
    }

    /// Replaces the default Open Graph extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl MetadataExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// `{base_url}/{percent-encoded handle}/`
    #[must_use]
    pub fn profile_url(&self, handle: &str) -> String {
        format!("{}/{}/", self.base_url, encode_handle(handle))
    }

    /// Fetches one profile and builds its record. Never fails: transport
    /// errors and non-2xx statuses become [`AccountRecord::failed`].
    ///
    /// `handle` is expected to be normalized already (see
    /// [`crate::batch::normalize_handles`]).
    pub async fn fetch_profile(&self, handle: &str) -> AccountRecord {
        match self.fetch_profile_html(handle).await {
            Ok(html) => {
                let meta = self.extractor.extract(&html);
                if meta.followers.is_none() && meta.name.is_none() {
                    tracing::debug!(handle, "no profile metadata found in page");
                }
                let rate = meta.followers.map(engagement_rate);
                AccountRecord::extracted(handle, meta.name, meta.followers, rate)
            }
            Err(e) => {
                tracing::warn!(handle, error = %e, "profile fetch failed");
                let message = e.to_string();
                if message.is_empty() {
                    AccountRecord::failed(handle, "fetch error")
                } else {
                    AccountRecord::failed(handle, message)
                }
            }
        }
    }

    /// Fetches the raw profile page body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx final status (after redirects).
    /// - [`ScraperError::Http`]: DNS, connect, TLS, timeout, or body-read failure.
    pub async fn fetch_profile_html(&self, handle: &str) -> Result<String, ScraperError> {
        let url = self.profile_url(handle);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(handle, status = status.as_u16(), %url, "non-success profile response");
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
