//! RAKE-style keyword extraction.
//!
//! Stopwords and sentence punctuation delimit candidate phrases. Every word
//! in a phrase of length L accumulates frequency +1 and co-occurrence degree
//! +(L-1); ranking favors words that are both frequent and embedded in
//! multi-word phrases. Identical input always yields identical output:
//! scores sort descending with ties broken by first occurrence.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Words that terminate a candidate phrase. Treated as versioned
/// configuration data; the list follows the usual English function words.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
        "itself", "just", "me", "more", "most", "my", "no", "nor", "not", "now", "of", "off",
        "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own", "same",
        "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
        "them", "then", "there", "these", "they", "this", "those", "through", "to", "too",
        "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
        "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    ]
    .into_iter()
    .collect()
});

/// Extract the top-N keywords from text, highest score first.
///
/// Words shorter than 3 characters are excluded from scoring. Deterministic:
/// same text, same list, every run.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    let mut freq: HashMap<String, usize> = HashMap::new();
    let mut degree: HashMap<String, usize> = HashMap::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut position = 0usize;

    let mut phrase: Vec<String> = Vec::new();
    let flush = |phrase: &mut Vec<String>,
                 freq: &mut HashMap<String, usize>,
                 degree: &mut HashMap<String, usize>| {
        if phrase.is_empty() {
            return;
        }
        let cooccurrence = phrase.len() - 1;
        for word in phrase.drain(..) {
            *freq.entry(word.clone()).or_insert(0) += 1;
            *degree.entry(word).or_insert(0) += cooccurrence;
        }
    };

    for token in text.split_whitespace() {
        let breaks_after = token
            .chars()
            .last()
            .map(|c| matches!(c, '.' | '!' | '?' | ',' | ';' | ':'))
            .unwrap_or(false);

        let word: String = token
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        if word.len() < 3 || STOPWORDS.contains(word.as_str()) {
            flush(&mut phrase, &mut freq, &mut degree);
        } else {
            first_seen.entry(word.clone()).or_insert_with(|| {
                let p = position;
                position += 1;
                p
            });
            phrase.push(word);
        }

        if breaks_after {
            flush(&mut phrase, &mut freq, &mut degree);
        }
    }
    flush(&mut phrase, &mut freq, &mut degree);

    let mut scored: Vec<(String, usize, usize)> = freq
        .into_iter()
        .map(|(word, f)| {
            let d = degree.get(&word).copied().unwrap_or(0);
            let seen = first_seen.get(&word).copied().unwrap_or(usize::MAX);
            (word, f + d, seen)
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    scored.truncate(top_n);
    scored.into_iter().map(|(word, _, _)| word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_words_outrank_singletons() {
        let keywords = extract_keywords(
            "machine learning tutorial for beginners learning machine learning basics",
            5,
        );
        let machine = keywords.iter().position(|k| k == "machine").unwrap();
        let learning = keywords.iter().position(|k| k == "learning").unwrap();
        let beginners = keywords.iter().position(|k| k == "beginners").unwrap();
        let basics = keywords.iter().position(|k| k == "basics").unwrap();
        assert!(machine < beginners);
        assert!(machine < basics);
        assert!(learning < beginners);
        assert!(learning < basics);
    }

    #[test]
    fn test_deterministic() {
        let text = "rust async runtime with tokio executors and rust futures in the runtime";
        let a = extract_keywords(text, 10);
        let b = extract_keywords(text, 10);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_short_words_excluded() {
        let keywords = extract_keywords("go go go ai ml compiler design", 10);
        assert!(!keywords.contains(&"go".to_string()));
        assert!(!keywords.contains(&"ai".to_string()));
        assert!(!keywords.contains(&"ml".to_string()));
        assert!(keywords.contains(&"compiler".to_string()));
    }

    #[test]
    fn test_punctuation_breaks_phrases() {
        // "database" ends the first sentence; "sharding" opens the next.
        // With the break they form separate phrases, so neither picks up
        // degree from the other.
        let keywords = extract_keywords("distributed database. sharding strategies", 10);
        assert!(keywords.contains(&"database".to_string()));
        assert!(keywords.contains(&"sharding".to_string()));
    }

    #[test]
    fn test_stopwords_never_returned() {
        let keywords = extract_keywords("the cat and the dog with the bird", 10);
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"and".to_string()));
        assert!(!keywords.contains(&"with".to_string()));
    }

    #[test]
    fn test_top_n_cap() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
        let keywords = extract_keywords(text, 3);
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_keywords("", 10).is_empty());
    }
}
