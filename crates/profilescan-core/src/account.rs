//! The per-handle result record shared by the scraper, server, and CLI.

use serde::{Deserialize, Serialize};

/// Result of analyzing one public profile handle.
///
/// A record is either *extracted* (data fields populated on a best-effort
/// basis, `error` absent) or *failed* (`error` set, every data field absent).
/// The two constructors are the only way to build one outside of
/// deserialization, so an error never travels alongside partial data.
///
/// Absent values serialize as JSON `null`, never as `0` or `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub handle: String,
    pub name: Option<String>,
    pub followers: Option<u64>,
    /// No source signal exists for this yet; always `None`.
    pub average_views: Option<u64>,
    /// No source signal exists for this yet; always `None`.
    pub category: Option<String>,
    /// Heuristic estimate derived from the follower bucket. Not a measured metric.
    pub engagement_rate: Option<f64>,
    /// No source signal exists for this yet; always `None`.
    pub location: Option<String>,
    pub error: Option<String>,
}

impl AccountRecord {
    /// Builds a successful record from whatever the page metadata yielded.
    ///
    /// A record with every optional field `None` is still a success: the page
    /// was fetched but the expected markup was not there.
    #[must_use]
    pub fn extracted(
        handle: impl Into<String>,
        name: Option<String>,
        followers: Option<u64>,
        engagement_rate: Option<f64>,
    ) -> Self {
        Self {
            handle: handle.into(),
            name,
            followers,
            average_views: None,
            category: None,
            engagement_rate,
            location: None,
            error: None,
        }
    }

    /// Builds a failed record carrying only the handle and the failure message.
    #[must_use]
    pub fn failed(handle: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            name: None,
            followers: None,
            average_views: None,
            category: None,
            engagement_rate: None,
            location: None,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}
