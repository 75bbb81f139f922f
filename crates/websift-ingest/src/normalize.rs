//! Content normalization: entity remnants, whitespace, boilerplate lines.
//!
//! Input is already-extracted plain text; markup stripping belongs to the
//! external extraction library. What still reaches this stage is the debris
//! extraction leaves behind: HTML entities, cookie banners, footer phrases,
//! social-media prompts. Lines matching the boilerplate table are dropped
//! wholesale.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed entity replacements applied before the generic entity sweep.
const ENTITY_MAP: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&#39;", "'"),
    ("&#34;", "\""),
];

/// Numeric and named entity remnants not covered by the fixed map.
static ENTITY_REMNANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#?\w{1,8};").expect("entity remnant pattern"));

/// Navigation, footer, and social boilerplate. A line matching any of these
/// is dropped entirely. Swappable configuration data in spirit; extend here
/// when a new crawl source brings new debris.
static BOILERPLATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)all rights reserved",
        r"(?i)\bfollow us on\b",
        r"(?i)skip to (main )?content",
        r"(?i)subscribe to (our )?newsletter",
        r"(?i)accept (all )?cookies",
        r"(?i)we use cookies",
        r"(?i)cookie (policy|settings|preferences)",
        r"(?i)privacy policy",
        r"(?i)terms of (service|use)",
        r"(?i)share (this|on) (article|page|facebook|twitter|linkedin)",
        r"(?i)sign (in|up) to continue",
        r"(?i)log in to (your account|continue)",
        r"(?i)^\s*advertisement\s*$",
        r"(?i)click here to",
        r"(?i)back to top",
        r"(?i)related (articles|posts|stories)",
        r"(?i)copyright (©|\(c\)|\d{4})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("boilerplate pattern"))
    .collect()
});

/// Normalized page text plus the extracted title.
#[derive(Debug, Clone)]
pub struct NormalizedText {
    pub text: String,
    pub title: String,
}

/// Clean extracted text and pull a title from its first heading or line.
///
/// Returns `None` when fewer than `min_words` words survive cleaning, which
/// the orchestrator treats as "likely navigation or spam, reject". Pure
/// function; no side effects.
pub fn normalize(raw: &str, min_words: usize) -> Option<NormalizedText> {
    let mut lines: Vec<String> = Vec::new();

    for line in raw.lines() {
        let decoded = decode_entities(line);
        let collapsed = collapse_whitespace(&decoded);
        if collapsed.is_empty() {
            continue;
        }
        if BOILERPLATE_PATTERNS.iter().any(|re| re.is_match(&collapsed)) {
            continue;
        }
        lines.push(collapsed);
    }

    if lines.is_empty() {
        return None;
    }

    let title = extract_title(&lines);
    let text = lines.join("\n");

    if text.split_whitespace().count() < min_words {
        return None;
    }

    Some(NormalizedText { text, title })
}

/// Replace known entities, then sweep any remaining `&...;` remnants.
fn decode_entities(line: &str) -> String {
    let mut out = line.to_string();
    for (entity, replacement) in ENTITY_MAP {
        if out.contains(entity) {
            out = out.replace(entity, replacement);
        }
    }
    ENTITY_REMNANT.replace_all(&out, " ").into_owned()
}

/// Collapse whitespace runs to single spaces and trim.
fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    while buf.ends_with(' ') {
        buf.pop();
    }
    buf
}

/// Title: first ATX heading if one exists near the top, else the first line.
fn extract_title(lines: &[String]) -> String {
    for line in lines.iter().take(5) {
        if let Some(stripped) = strip_atx(line) {
            return truncate_title(stripped);
        }
    }
    truncate_title(&lines[0])
}

fn strip_atx(line: &str) -> Option<&str> {
    if !line.starts_with('#') {
        return None;
    }
    let level = line.chars().take_while(|c| *c == '#').count();
    if level > 6 {
        return None;
    }
    let text = line[level..].trim().trim_end_matches('#').trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn truncate_title(title: &str) -> String {
    const MAX_TITLE_CHARS: usize = 120;
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }
    title.chars().take(MAX_TITLE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_entity_decoding() {
        let raw = format!("Fish &amp; chips &nbsp; &#8212; a guide\n{}", words(60));
        let result = normalize(&raw, 50).unwrap();
        assert!(result.text.starts_with("Fish & chips"));
        assert!(!result.text.contains("&#8212;"));
    }

    #[test]
    fn test_boilerplate_lines_dropped() {
        let raw = format!(
            "A real first line of content\nFollow us on Twitter\nAll Rights Reserved 2024\n{}",
            words(60)
        );
        let result = normalize(&raw, 50).unwrap();
        assert!(!result.text.contains("Follow us on"));
        assert!(!result.text.contains("Rights Reserved"));
        assert!(result.text.contains("A real first line"));
    }

    #[test]
    fn test_below_word_floor_rejected() {
        assert!(normalize("Too short to keep.", 50).is_none());
    }

    #[test]
    fn test_title_from_heading() {
        let raw = format!("# Rust Ownership Explained\n{}", words(60));
        let result = normalize(&raw, 50).unwrap();
        assert_eq!(result.title, "Rust Ownership Explained");
    }

    #[test]
    fn test_title_falls_back_to_first_line() {
        let raw = format!("An Introduction to Sourdough\n{}", words(60));
        let result = normalize(&raw, 50).unwrap();
        assert_eq!(result.title, "An Introduction to Sourdough");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let raw = format!("spaced    out\t\ttext here\n{}", words(60));
        let result = normalize(&raw, 50).unwrap();
        assert!(result.text.starts_with("spaced out text here"));
    }

    #[test]
    fn test_only_boilerplate_is_empty() {
        let raw = "We use cookies\nAccept all cookies\nPrivacy Policy";
        assert!(normalize(raw, 1).is_none());
    }
}
