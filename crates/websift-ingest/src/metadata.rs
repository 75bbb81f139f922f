//! Page metadata recovery from residual markup.
//!
//! Extraction hands this pipeline plain text, but canonical links, meta
//! descriptions, author tags, and article timestamps frequently survive as
//! markup remnants. Everything here is regex-driven and best-effort: a
//! missing field is `None`, never an error.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters of raw input scanned for metadata. Meta remnants live at the
/// top of the document.
const SCAN_CHARS: usize = 4000;

static CANONICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)rel=["']?canonical["']?[^>]*?href=["']([^"']+)["']"#)
        .expect("canonical pattern")
});

static CANONICAL_HREF_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)href=["']([^"']+)["'][^>]*?rel=["']?canonical["']?"#)
        .expect("canonical href-first pattern")
});

static DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)name=["'](?:og:)?description["'][^>]*?content=["']([^"']+)["']"#)
        .expect("description pattern")
});

static AUTHOR_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)name=["']author["'][^>]*?content=["']([^"']+)["']"#)
        .expect("author pattern")
});

static AUTHOR_BYLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^By ([A-Z][a-z]+(?: [A-Z][a-z]+){1,2})$").expect("byline pattern")
});

static PUBLISHED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(?:article:published_time|datePublished)["']?\s*(?:content=["']|:\s*["'])([^"']+)["']"#,
    )
    .expect("published pattern")
});

static MODIFIED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(?:article:modified_time|dateModified)["']?\s*(?:content=["']|:\s*["'])([^"']+)["']"#,
    )
    .expect("modified pattern")
});

/// Metadata recovered from one page.
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    /// Canonical URL when present and different from the fetched URL.
    pub canonical_url: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
}

/// Best-effort metadata scan over the raw page head.
pub fn extract_page_meta(raw: &str, url: &str) -> PageMeta {
    let head: String = raw.chars().take(SCAN_CHARS).collect();

    let canonical_url = capture(&CANONICAL, &head)
        .or_else(|| capture(&CANONICAL_HREF_FIRST, &head))
        .filter(|canonical| canonical != url);

    let author_name = capture(&AUTHOR_META, &head).or_else(|| capture(&AUTHOR_BYLINE, &head));

    PageMeta {
        canonical_url,
        description: capture(&DESCRIPTION, &head),
        author_name,
        published_date: capture(&PUBLISHED, &head).and_then(|d| parse_date(&d)),
        modified_date: capture(&MODIFIED, &head).and_then(|d| parse_date(&d)),
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse RFC 3339 first, then a bare `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_differs_from_url() {
        let raw = r#"<link rel="canonical" href="https://example.com/post"> body text"#;
        let meta = extract_page_meta(raw, "https://example.com/post?ref=feed");
        assert_eq!(meta.canonical_url.as_deref(), Some("https://example.com/post"));
    }

    #[test]
    fn test_canonical_equal_is_dropped() {
        let raw = r#"<link rel="canonical" href="https://example.com/post">"#;
        let meta = extract_page_meta(raw, "https://example.com/post");
        assert!(meta.canonical_url.is_none());
    }

    #[test]
    fn test_description_and_author() {
        let raw = r#"<meta name="description" content="A short page summary.">
            <meta name="author" content="Jordan Smith">"#;
        let meta = extract_page_meta(raw, "https://example.com");
        assert_eq!(meta.description.as_deref(), Some("A short page summary."));
        assert_eq!(meta.author_name.as_deref(), Some("Jordan Smith"));
    }

    #[test]
    fn test_byline_author() {
        let raw = "Headline for the piece\nBy Dana Wells\nThe body begins here.";
        let meta = extract_page_meta(raw, "https://example.com");
        assert_eq!(meta.author_name.as_deref(), Some("Dana Wells"));
    }

    #[test]
    fn test_published_date_rfc3339() {
        let raw = r#"<meta property="article:published_time" content="2024-03-05T10:30:00Z">"#;
        let meta = extract_page_meta(raw, "https://example.com");
        let date = meta.published_date.unwrap();
        assert_eq!(date.to_rfc3339(), "2024-03-05T10:30:00+00:00");
    }

    #[test]
    fn test_bare_date() {
        assert!(parse_date("2023-11-20").is_some());
        assert!(parse_date("last Tuesday").is_none());
    }

    #[test]
    fn test_missing_everything() {
        let meta = extract_page_meta("plain text with no remnants", "https://example.com");
        assert!(meta.canonical_url.is_none());
        assert!(meta.description.is_none());
        assert!(meta.author_name.is_none());
        assert!(meta.published_date.is_none());
    }
}
