//! Best-effort public profile scraping: fetch a profile page, pull follower
//! count and display name out of its Open Graph metadata, and attach a
//! heuristic engagement estimate.

pub mod batch;
pub mod client;
pub mod count;
pub mod engagement;
pub mod error;
pub mod extract;

pub use batch::{normalize_handles, ProfileAnalyzer, MAX_HANDLES_PER_BATCH};
pub use client::ProfileClient;
pub use count::parse_count;
pub use engagement::engagement_rate;
pub use error::ScraperError;
pub use extract::{MetadataExtractor, OpenGraphExtractor, ProfileMetadata};
