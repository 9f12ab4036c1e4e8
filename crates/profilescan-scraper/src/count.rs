//! Parsing of abbreviated human-readable counts such as `"689M"` or `"1.5k"`.

use std::sync::LazyLock;

use regex::Regex;

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:[.,][0-9]+)?)\s*([km])?").expect("valid count regex")
});

/// Parses the first number in `text`, honoring an optional `k`/`m` suffix.
///
/// Both `.` and `,` are read as the decimal separator. Comma-grouped
/// thousands are therefore *not* understood: `"7,123"` is 7.123, which
/// rounds to `7`. Profile descriptions abbreviate follower counts ("689M",
/// "12.3K") so the follower path rarely sees grouped digits, and keeping the
/// comma-as-decimal reading stays compatible with previously exported data.
///
/// Returns `None` when `text` contains no digits.
#[must_use]
pub fn parse_count(text: &str) -> Option<u64> {
    let lower = text.trim().to_lowercase();
    let caps = COUNT_RE.captures(&lower)?;
    let number: f64 = caps.get(1)?.as_str().replace(',', ".").parse().ok()?;

    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("k") => 1_000.0,
        Some("m") => 1_000_000.0,
        _ => 1.0,
    };

    // Non-negative by construction; `as` saturates on absurdly long digit runs.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (number * multiplier).round() as u64;
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_millions_suffix() {
        assert_eq!(parse_count("689M"), Some(689_000_000));
    }

    #[test]
    fn parses_fractional_thousands_suffix() {
        assert_eq!(parse_count("1.5k"), Some(1_500));
    }

    #[test]
    fn parses_plain_integer() {
        assert_eq!(parse_count("42"), Some(42));
    }

    #[test]
    fn suffix_is_case_insensitive_and_may_follow_whitespace() {
        assert_eq!(parse_count("12.3 K"), Some(12_300));
        assert_eq!(parse_count(" 2m "), Some(2_000_000));
    }

    #[test]
    fn comma_is_treated_as_decimal_separator() {
        // Grouped thousands are misread on purpose; see `parse_count` docs.
        assert_eq!(parse_count("7,123"), Some(7));
        assert_eq!(parse_count("1,234,567"), Some(1));
        assert_eq!(parse_count("1,5M"), Some(1_500_000));
    }

    #[test]
    fn rounds_to_nearest_integer() {
        assert_eq!(parse_count("2.5"), Some(3));
        assert_eq!(parse_count("2.4"), Some(2));
        assert_eq!(parse_count("1.2346k"), Some(1_235));
    }

    #[test]
    fn uses_first_number_in_text() {
        assert_eq!(parse_count("about 15k people, 3 posts"), Some(15_000));
    }

    #[test]
    fn no_digits_is_none() {
        assert_eq!(parse_count("Followers"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn unknown_suffix_is_ignored() {
        assert_eq!(parse_count("3b"), Some(3));
    }
}
