//! Metadata extraction from raw profile-page HTML.
//!
//! Profile pages embed a summary of the account in their Open Graph tags:
//!
//! ```text
//! <meta property="og:description" content="689M Followers, 123 Following, 7,123 Posts - ...">
//! <meta property="og:title" content="Instagram (@instagram) • Instagram photos and videos">
//! ```
//!
//! Nothing here builds a DOM. The markup is owned by the target site and can
//! change without notice, so every field is optional and a miss is not an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::count::parse_count;

/// A `<meta>` tag. Quoted attribute values are consumed whole, so a raw `>`
/// inside one does not end the tag.
static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("valid meta tag regex")
});
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:.-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid attr regex")
});
static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9][0-9.,]*\s*[km]?)\s+Followers").expect("valid followers regex")
});
static TITLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\(@").expect("valid title regex"));

/// Character references seen in profile-page attribute values. `&amp;` is
/// last so `&amp;quot;` decodes to the literal text `&quot;`.
const ENTITIES: [(&str, &str); 10] = [
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&#039;", "'"),
    ("&#x27;", "'"),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&#064;", "@"),
    ("&#64;", "@"),
    ("&amp;", "&"),
];

/// Fields recovered from a profile page. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMetadata {
    pub followers: Option<u64>,
    pub name: Option<String>,
}

/// Pulls [`ProfileMetadata`] out of a fetched page.
///
/// Implementations must not fail: a page that does not match their
/// conventions yields an empty [`ProfileMetadata`].
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, html: &str) -> ProfileMetadata;
}

/// Reads `og:description` for the follower count and `og:title` for the
/// display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGraphExtractor;

impl MetadataExtractor for OpenGraphExtractor {
    fn extract(&self, html: &str) -> ProfileMetadata {
        let followers = find_meta_content(html, "property", "og:description")
            .as_deref()
            .and_then(followers_from_description);
        let name = find_meta_content(html, "property", "og:title")
            .as_deref()
            .and_then(name_from_title);

        ProfileMetadata { followers, name }
    }
}

/// `"689M Followers, 123 Following, ..."` → `689_000_000`.
fn followers_from_description(description: &str) -> Option<u64> {
    let caps = FOLLOWERS_RE.captures(description)?;
    parse_count(caps.get(1)?.as_str())
}

/// `"Instagram (@instagram) • Instagram photos and videos"` → `"Instagram"`.
fn name_from_title(title: &str) -> Option<String> {
    let caps = TITLE_NAME_RE.captures(title)?;
    let name = caps.get(1)?.as_str().trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Returns the decoded `content` of the first `<meta>` tag whose `key_attr`
/// equals `key_value` (case-insensitive). Attribute order does not matter.
fn find_meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if key.trim().eq_ignore_ascii_case(key_value) {
            extract_attr(tag, "content").map(decode_entities)
        } else {
            None
        }
    })
}

fn extract_attr<'t>(tag: &'t str, attr: &str) -> Option<&'t str> {
    ATTR_RE.captures_iter(tag).find_map(|caps| {
        let name = caps.get(1)?.as_str();
        if !name.eq_ignore_ascii_case(attr) {
            return None;
        }
        caps.get(2).or_else(|| caps.get(3)).map(|v| v.as_str())
    })
}

fn decode_entities(raw: &str) -> String {
    ENTITIES
        .iter()
        .fold(raw.to_string(), |acc, (entity, plain)| acc.replace(entity, plain))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTAGRAM_HTML: &str = r#"<html><head>
        <meta property="og:description" content="689M Followers, 123 Following, 7,123 Posts - See Instagram photos and videos from Instagram (@instagram)">
        <meta property="og:title" content="Instagram (@instagram) ? Instagram photos and videos">
        </head><body></body></html>"#;

    fn extract(html: &str) -> ProfileMetadata {
        OpenGraphExtractor.extract(html)
    }

    #[test]
    fn extracts_followers_and_name_from_open_graph_tags() {
        let meta = extract(INSTAGRAM_HTML);
        assert_eq!(meta.followers, Some(689_000_000));
        assert_eq!(meta.name.as_deref(), Some("Instagram"));
    }

    #[test]
    fn missing_tags_yield_empty_metadata() {
        let meta = extract("<html><head><title>Login • Instagram</title></head></html>");
        assert_eq!(meta, ProfileMetadata::default());
    }

    #[test]
    fn attribute_order_does_not_matter() {
        let html = r#"<meta content="12.5K Followers, 10 Following" property="og:description">
                      <meta content='Jane Doe (@jane) • photos' property='og:title' />"#;
        let meta = extract(html);
        assert_eq!(meta.followers, Some(12_500));
        assert_eq!(meta.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn angle_bracket_inside_quoted_value_does_not_end_the_tag() {
        let html = r#"<meta property="og:description" content="1.2K Followers, 3 Following - Rock > Pop">
                      <meta property="og:title" content='Tom > Jerry (@tomjerry) • photos'>"#;
        let meta = extract(html);
        assert_eq!(meta.followers, Some(1_200));
        assert_eq!(meta.name.as_deref(), Some("Tom > Jerry"));
    }

    #[test]
    fn content_before_key_with_angle_bracket_is_found() {
        let html = r#"<meta content="a > b (@ab) • photos" property="og:title">"#;
        assert_eq!(extract(html).name.as_deref(), Some("a > b"));
    }

    #[test]
    fn followers_phrase_is_case_insensitive() {
        let html = r#"<meta property="og:description" content="3,400 followers · 12 following">"#;
        // Comma read as decimal separator: 3.4 rounds to 3.
        assert_eq!(extract(html).followers, Some(3));
    }

    #[test]
    fn description_without_followers_phrase_is_a_miss() {
        let html = r#"<meta property="og:description" content="Create an account or log in.">
                      <meta property="og:title" content="Jane Doe (@jane) • photos">"#;
        let meta = extract(html);
        assert_eq!(meta.followers, None);
        assert_eq!(meta.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn title_without_handle_marker_is_a_miss() {
        let html = r#"<meta property="og:title" content="Instagram">"#;
        assert_eq!(extract(html).name, None);
    }

    #[test]
    fn title_with_only_handle_marker_is_a_miss() {
        let html = r#"<meta property="og:title" content=" (@ghost) • photos">"#;
        assert_eq!(extract(html).name, None);
    }

    #[test]
    fn name_is_text_before_first_handle_marker() {
        let html = r#"<meta property="og:title" content="  NASA (@nasa) (@other) • photos">"#;
        assert_eq!(extract(html).name.as_deref(), Some("NASA"));
    }

    #[test]
    fn entity_encoded_values_are_decoded() {
        let html = r#"<meta property="og:title" content="Ben &amp; Jerry&#039;s (&#064;benandjerrys) &#x2022; Instagram">
                      <meta property="og:description" content="1.1M Followers, 600 Following">"#;
        let meta = extract(html);
        assert_eq!(meta.name.as_deref(), Some("Ben & Jerry's"));
        assert_eq!(meta.followers, Some(1_100_000));
    }

    #[test]
    fn other_meta_tags_are_ignored() {
        let html = r#"<meta name="description" content="999 Followers">
                      <meta property="og:image" content="https://cdn.example.com/p.jpg">"#;
        assert_eq!(extract(html), ProfileMetadata::default());
    }

    #[test]
    fn decode_entities_does_not_double_decode() {
        assert_eq!(decode_entities("&amp;quot;"), "&quot;");
    }
}
