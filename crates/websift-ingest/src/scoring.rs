//! Domain authority and content-type quality scoring.
//!
//! Domain scores come from a curated tier table with a TLD-suffix fallback;
//! both are immutable after construction and safe to read concurrently. The
//! tier boundaries are empirical tuning data, not fixed law. Content-type
//! boosts are regex families that only fire when the supplied topic terms
//! align with the family, so a tutorial page is not boosted for a corpus
//! that never asks tutorial-shaped questions.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use url::Url;

/// Hard cap on the combined quality boost.
pub const MAX_BOOST: f64 = 3.0;

/// Curated high-authority domains. Exact-match lookup.
static DOMAIN_TIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m = HashMap::new();
    // Tier 1: major reference sites
    for domain in [
        "en.wikipedia.org",
        "wikipedia.org",
        "developer.mozilla.org",
        "docs.python.org",
        "doc.rust-lang.org",
    ] {
        m.insert(domain, 2.0);
    }
    // Tier 2: high-signal technical and academic sources
    for domain in ["stackoverflow.com", "arxiv.org", "nature.com", "acm.org"] {
        m.insert(domain, 1.8);
    }
    for domain in ["github.com", "docs.rs", "kubernetes.io", "postgresql.org"] {
        m.insert(domain, 1.7);
    }
    // Tier 3: established publishers
    for domain in [
        "nytimes.com",
        "bbc.com",
        "bbc.co.uk",
        "reuters.com",
        "theguardian.com",
    ] {
        m.insert(domain, 1.5);
    }
    // Tier 4: quality blog platforms
    for domain in ["medium.com", "dev.to", "substack.com", "hashnode.dev"] {
        m.insert(domain, 1.2);
    }
    m
});

/// Suffix fallback for educational, government, and nonprofit TLDs.
static TLD_TIERS: &[(&str, f64)] = &[
    (".gov", 1.7),
    (".edu", 1.6),
    (".ac.uk", 1.6),
    (".org", 1.2),
];

/// Memoized URL → registrable-host extraction. The same domain recurs
/// across a batch, so parse each URL string once.
static DOMAIN_CACHE: Lazy<DashMap<String, Option<String>>> = Lazy::new(DashMap::new);

/// A regex family that boosts one shape of content.
struct BoostFamily {
    name: &'static str,
    patterns: Vec<Regex>,
    /// Topic terms that unlock this family.
    triggers: &'static [&'static str],
    boost: f64,
}

static BOOST_FAMILIES: Lazy<Vec<BoostFamily>> = Lazy::new(|| {
    let family = |name, patterns: &[&str], triggers, boost| BoostFamily {
        name,
        patterns: patterns
            .iter()
            .map(|p| Regex::new(p).expect("boost pattern"))
            .collect(),
        triggers,
        boost,
    };
    vec![
        family(
            "definitional",
            &[
                r"(?i)\bwhat is\b",
                r"(?i)\bdefinition of\b",
                r"(?i)\bis defined as\b",
                r"(?i)\brefers to\b",
            ],
            &["what", "define", "definition", "meaning"] as &[&str],
            1.5,
        ),
        family(
            "tutorial",
            &[
                r"(?i)\bhow to\b",
                r"(?i)\bstep \d",
                r"(?i)\btutorial\b",
                r"(?i)\bgetting started\b",
                r"(?i)\bwalkthrough\b",
            ],
            &["how", "tutorial", "guide", "learn", "build"],
            1.4,
        ),
        family(
            "reference",
            &[
                r"(?i)\bapi reference\b",
                r"(?i)\bdocumentation\b",
                r"(?i)\bparameters\b",
                r"(?i)\breturn value\b",
            ],
            &["api", "reference", "docs", "documentation", "usage"],
            1.3,
        ),
        family(
            "example",
            &[r"(?i)\bfor example\b", r"(?i)\bexample\b", r"(?i)\bsample code\b"],
            &["example", "examples", "sample", "snippet"],
            1.2,
        ),
    ]
});

/// Registrable host of a URL, without any `www.` prefix. Memoized.
pub fn domain_of(url: &str) -> Option<String> {
    if let Some(cached) = DOMAIN_CACHE.get(url) {
        return cached.value().clone();
    }
    let domain = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .map(|h| h.trim_start_matches("www.").to_string());
    DOMAIN_CACHE.insert(url.to_string(), domain.clone());
    domain
}

/// Authority score for a URL's domain: exact tier match, then TLD suffix
/// fallback, then 1.0.
pub fn domain_score(url: &str) -> f64 {
    let Some(domain) = domain_of(url) else {
        return 1.0;
    };
    if let Some(score) = DOMAIN_TIERS.get(domain.as_str()) {
        return *score;
    }
    for (suffix, score) in TLD_TIERS {
        if domain.ends_with(suffix) {
            return *score;
        }
    }
    1.0
}

/// Multiplicative content-type boost over the families whose triggers align
/// with the supplied topic terms. Returns 1.0 when nothing aligns.
pub fn content_type_boost(title: &str, content: &str, terms: &[String]) -> f64 {
    let mut boost = 1.0;
    for family in BOOST_FAMILIES.iter() {
        let aligned = terms.iter().any(|term| {
            let term = term.to_lowercase();
            family.triggers.iter().any(|t| term.contains(t))
        });
        if !aligned {
            continue;
        }
        let matched = family
            .patterns
            .iter()
            .any(|re| re.is_match(title) || re.is_match(content));
        if matched {
            tracing::debug!(family = family.name, "content-type boost applied");
            boost *= family.boost;
        }
    }
    boost
}

/// Combined quality boost, capped at [`MAX_BOOST`].
pub fn total_boost(url: &str, title: &str, content: &str, terms: &[String]) -> f64 {
    (domain_score(url) * content_type_boost(title, content, terms)).min(MAX_BOOST)
}
