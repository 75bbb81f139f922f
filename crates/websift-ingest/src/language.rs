//! Multi-signal English detection.
//!
//! Signals run cheapest and most authoritative first, short-circuiting:
//! explicit `lang=` markers, known-English domains and TLDs, non-Latin
//! script scan, then lexical statistics over a bounded sample. This is a
//! heuristic gate run before the expensive pipeline stages; it trades recall
//! for speed and is not a language-model classifier.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

use crate::scoring::domain_of;

/// Characters examined by the script scan and lexical statistics.
const SAMPLE_CHARS: usize = 1000;
/// Words examined for the English function-word ratio.
const SAMPLE_WORDS: usize = 100;
/// Below this many characters there is not enough evidence to classify
/// anything as English, whatever the other signals say.
const MIN_CLASSIFIABLE_CHARS: usize = 50;

/// Explicit language marker left behind by extraction, e.g. `lang="en-US"`.
static LANG_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\blang\s*=\s*["']?([a-zA-Z]{2})"#).expect("lang marker"));

/// Domains whose content is overwhelmingly English.
static ENGLISH_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "en.wikipedia.org",
        "stackoverflow.com",
        "github.com",
        "news.ycombinator.com",
        "reddit.com",
        "medium.com",
        "dev.to",
        "arxiv.org",
        "bbc.com",
        "bbc.co.uk",
        "nytimes.com",
        "theguardian.com",
        "reuters.com",
    ]
    .into_iter()
    .collect()
});

/// TLD suffixes from English-speaking jurisdictions.
const ENGLISH_TLDS: &[&str] = &[".uk", ".us", ".au", ".ca", ".nz", ".ie", ".gov", ".edu"];

/// Common English function words for the ratio signal.
static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "be", "to", "of", "and", "a", "in", "that", "have", "it", "for", "not", "on",
        "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they",
        "we", "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there",
        "their", "what", "so", "up", "out", "if", "about", "who", "get", "which", "when",
        "can", "like", "time", "just", "him", "know", "take", "into", "your", "some", "could",
        "them", "than", "then", "now", "only", "its", "over", "also", "after", "use", "two",
        "how", "our", "first", "well", "way", "even", "because", "any", "these", "most",
        "is", "are", "was", "were", "has", "had",
    ]
    .into_iter()
    .collect()
});

/// High-frequency English constructions for the pattern-density signal.
static ENGLISH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bthe\s+\w+",
        r"(?i)\b(?:is|are|was|were|been|being)\b",
        r"(?i)\b(?:and|or|but|because|although)\s+\w+",
        r"(?i)\b\w+ing\b",
        r"(?i)\b\w+(?:tion|ment|ness|ity)\b",
        r"(?i)\b(?:of|in|to|for|with|on|at|by)\s+the\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("english pattern"))
    .collect()
});

/// Unicode block ranges that rule English out on sight.
const NON_LATIN_RANGES: &[(u32, u32)] = &[
    (0x0400, 0x04FF), // Cyrillic
    (0x0590, 0x05FF), // Hebrew
    (0x0600, 0x06FF), // Arabic
    (0x0750, 0x077F), // Arabic Supplement
    (0x0900, 0x097F), // Devanagari
    (0x0E00, 0x0E7F), // Thai
    (0x1100, 0x11FF), // Hangul Jamo
    (0x3040, 0x309F), // Hiragana
    (0x30A0, 0x30FF), // Katakana
    (0x3400, 0x4DBF), // CJK Extension A
    (0x4E00, 0x9FFF), // CJK Unified Ideographs
    (0xAC00, 0xD7AF), // Hangul Syllables
];

/// Every signal the detector looked at, for diagnostics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LanguageStats {
    /// Explicit marker value, lowercased, when present.
    pub marker: Option<String>,
    pub domain_allowlisted: bool,
    pub non_latin_script: bool,
    pub english_word_ratio: f64,
    pub pattern_score: f64,
    /// Combined lexical confidence, `0.6 * ratio + 0.4 * pattern`.
    pub confidence: f64,
}

/// Classify a page as English or not. Returns `Some("en")` on acceptance.
pub fn detect_language(text: &str, url: &str, threshold: f64) -> Option<&'static str> {
    let stats = language_stats(text, url);

    if text.chars().count() < MIN_CLASSIFIABLE_CHARS {
        return None;
    }
    if let Some(marker) = &stats.marker {
        return if marker == "en" { Some("en") } else { None };
    }
    // Script evidence beats the domain allowlist: a page of CJK text is not
    // English no matter where it is hosted.
    if stats.non_latin_script {
        return None;
    }
    if stats.domain_allowlisted {
        return Some("en");
    }
    if stats.confidence > threshold {
        Some("en")
    } else {
        None
    }
}

/// Diagnostic form: compute every signal without short-circuiting the
/// lexical statistics.
pub fn language_stats(text: &str, url: &str) -> LanguageStats {
    let sample: String = text.chars().take(SAMPLE_CHARS).collect();

    let marker = LANG_MARKER
        .captures(&sample)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase());

    let domain_allowlisted = is_english_host(url);
    let non_latin_script = sample.chars().any(is_non_latin);

    let words: Vec<&str> = sample.split_whitespace().take(SAMPLE_WORDS).collect();
    let english_word_ratio = if words.is_empty() {
        0.0
    } else {
        let hits = words
            .iter()
            .filter(|w| {
                let lower: String = w
                    .chars()
                    .filter(|c| c.is_alphabetic())
                    .collect::<String>()
                    .to_lowercase();
                FUNCTION_WORDS.contains(lower.as_str())
            })
            .count();
        hits as f64 / words.len() as f64
    };

    let pattern_score = if words.is_empty() {
        0.0
    } else {
        let hits: usize = ENGLISH_PATTERNS
            .iter()
            .map(|re| re.find_iter(&sample).count())
            .sum();
        (hits as f64 / words.len() as f64).min(1.0)
    };

    let confidence = 0.6 * english_word_ratio + 0.4 * pattern_score;

    LanguageStats {
        marker,
        domain_allowlisted,
        non_latin_script,
        english_word_ratio,
        pattern_score,
        confidence,
    }
}

fn is_english_host(url: &str) -> bool {
    let Some(domain) = domain_of(url) else {
        return false;
    };
    if ENGLISH_DOMAINS.contains(domain.as_str()) {
        return true;
    }
    ENGLISH_TLDS.iter().any(|tld| domain.ends_with(tld))
}

fn is_non_latin(ch: char) -> bool {
    let cp = ch as u32;
    NON_LATIN_RANGES
        .iter()
        .any(|(start, end)| cp >= *start && cp <= *end)
}
