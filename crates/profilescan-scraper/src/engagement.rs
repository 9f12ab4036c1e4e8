//! Follower-bucket engagement heuristic.

/// Estimated engagement rate (0..1) for an account with `followers` followers.
///
/// This is a rough rule of thumb, not a measurement: smaller accounts tend to
/// see a larger share of their audience interact. Nothing about the account
/// besides its follower count is considered.
///
/// | followers              | rate   |
/// |------------------------|--------|
/// | < 10,000               | 0.05   |
/// | 10,000 – 99,999        | 0.035  |
/// | 100,000 – 999,999      | 0.02   |
/// | ≥ 1,000,000            | 0.0125 |
#[must_use]
pub fn engagement_rate(followers: u64) -> f64 {
    match followers {
        0..10_000 => 0.05,
        10_000..100_000 => 0.035,
        100_000..1_000_000 => 0.02,
        _ => 0.0125,
    }
}
