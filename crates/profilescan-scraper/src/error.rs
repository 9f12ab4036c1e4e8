use thiserror::Error;

/// Failure modes of a single profile fetch.
///
/// `Display` output is what ends up in [`profilescan_core::AccountRecord::error`],
/// so the status variant renders as the bare `HTTP <code>` form.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error("invalid profile URL \"{url}\": {reason}")]
    InvalidProfileUrl { url: String, reason: String },
}
