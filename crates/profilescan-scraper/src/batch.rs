//! Batch analysis: normalize a raw handle list and fetch every profile
//! concurrently, one record per distinct handle.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use profilescan_core::{AccountRecord, AppConfig};

use crate::client::ProfileClient;
use crate::error::ScraperError;

/// Upper bound on handles analyzed per batch, applied after deduplication.
pub const MAX_HANDLES_PER_BATCH: usize = 25;

/// Trims each handle, strips one leading `@`, drops empties, dedupes
/// keeping first-seen order, and caps the result at
/// [`MAX_HANDLES_PER_BATCH`].
pub fn normalize_handles<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    raw.into_iter()
        .filter_map(|h| {
            let trimmed = h.as_ref().trim();
            let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);
            (!handle.is_empty()).then(|| handle.to_owned())
        })
        .filter(|h| seen.insert(h.clone()))
        .take(MAX_HANDLES_PER_BATCH)
        .collect()
}

/// Runs [`ProfileClient::fetch_profile`] across a batch of handles.
#[derive(Debug, Clone)]
pub struct ProfileAnalyzer {
    client: ProfileClient,
    max_concurrent: usize,
}

impl ProfileAnalyzer {
    /// `max_concurrent` bounds in-flight fetches; values below 1 are raised to 1.
    #[must_use]
    pub fn new(client: ProfileClient, max_concurrent: usize) -> Self {
        Self {
            client,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// # Errors
    ///
    /// Returns [`ScraperError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self::new(
            ProfileClient::from_config(config)?,
            config.max_concurrent_fetches,
        ))
    }

    /// Analyzes every distinct handle in `raw_handles`.
    ///
    /// The returned records line up with the normalized handle order, not
    /// with the order fetches complete in. One handle's failure is isolated
    /// to its own record, so the output length always equals the number of
    /// handles that survive [`normalize_handles`].
    pub async fn analyze<I, S>(&self, raw_handles: I) -> Vec<AccountRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let handles = normalize_handles(raw_handles);
        let handle_count = handles.len();
        tracing::info!(
            handles = handle_count,
            max_concurrent = self.max_concurrent,
            "analyzing profile batch"
        );

        let client = &self.client;
        let records: Vec<AccountRecord> = stream::iter(handles)
            .map(|handle| async move { client.fetch_profile(&handle).await })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let failed = records.iter().filter(|r| r.is_failed()).count();
        if failed > 0 {
            tracing::warn!(failed, total = handle_count, "some profiles failed to fetch");
        }

        records
    }
}
