//! Content-type tagging and topic categorization.
//!
//! Pattern-driven classification of the document's shape (tutorial,
//! documentation, discussion, general) and keyword-table topic tags.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Minimum keyword hits before a topic tag is attached.
const MIN_TOPIC_HITS: usize = 2;
/// Maximum topic tags per document.
const MAX_CATEGORIES: usize = 3;

static TUTORIAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)\bhow to\b",
        r"(?i)\bstep \d",
        r"(?i)\btutorial\b",
        r"(?i)\bgetting started\b",
        r"(?i)\bin this guide\b",
    ])
});

static DOCUMENTATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)\bapi reference\b",
        r"(?i)\bdocumentation\b",
        r"(?i)\bparameters\b",
        r"(?i)\breturn value\b",
        r"(?i)\binstallation\b",
        r"(?i)\bchangelog\b",
    ])
});

static DISCUSSION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)\breplied\b",
        r"(?i)\bcomments?\b",
        r"(?i)\bupvote",
        r"(?i)\basked \d+ (days?|months?|years?) ago\b",
        r"(?i)\boriginal poster\b",
        r"(?i)\bthread\b",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("classify pattern"))
        .collect()
}

/// Topic keyword table for category tags.
static TOPIC_KEYWORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for kw in [
        "code", "compiler", "programming", "software", "api", "debugging", "algorithm",
        "database", "function", "variable", "runtime", "framework", "library", "server",
    ] {
        m.insert(kw, "programming");
    }
    for kw in [
        "research", "study", "experiment", "physics", "chemistry", "biology", "scientists",
        "hypothesis", "laboratory", "species", "climate",
    ] {
        m.insert(kw, "science");
    }
    for kw in [
        "market", "revenue", "startup", "investment", "economy", "earnings", "profit",
        "shares", "company", "industry", "customers",
    ] {
        m.insert(kw, "business");
    }
    for kw in [
        "health", "doctor", "medical", "disease", "treatment", "patients", "symptoms",
        "diet", "exercise", "vaccine",
    ] {
        m.insert(kw, "health");
    }
    for kw in [
        "election", "government", "president", "minister", "policy", "breaking",
        "reported", "officials", "announced",
    ] {
        m.insert(kw, "news");
    }
    for kw in [
        "game", "season", "team", "player", "championship", "league", "score", "coach",
        "tournament",
    ] {
        m.insert(kw, "sports");
    }
    for kw in [
        "course", "students", "learning", "university", "lesson", "teacher", "curriculum",
        "exam",
    ] {
        m.insert(kw, "education");
    }
    m
});

/// Tag the document's shape from its title and body.
pub fn classify_content_type(title: &str, text: &str) -> &'static str {
    let hits = |patterns: &[Regex]| {
        patterns
            .iter()
            .filter(|re| re.is_match(title) || re.is_match(text))
            .count()
    };

    let tutorial = hits(&TUTORIAL_PATTERNS);
    let documentation = hits(&DOCUMENTATION_PATTERNS);
    let discussion = hits(&DISCUSSION_PATTERNS);

    let best = tutorial.max(documentation).max(discussion);
    if best == 0 {
        return "general";
    }
    if tutorial == best {
        "tutorial"
    } else if documentation == best {
        "documentation"
    } else {
        "discussion"
    }
}

/// Topic tags for the document, most frequent first, at most
/// [`MAX_CATEGORIES`] entries. Falls back to an empty list rather than
/// inventing a tag.
pub fn classify_categories(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for word in text_lower.split(|c: char| !c.is_alphanumeric()) {
        if word.len() < 3 {
            continue;
        }
        if let Some(&topic) = TOPIC_KEYWORDS.get(word) {
            *counts.entry(topic).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= MIN_TOPIC_HITS)
        .collect();
    // Count descending, name ascending for determinism.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(MAX_CATEGORIES)
        .map(|(topic, _)| topic.to_string())
        .collect()
}
