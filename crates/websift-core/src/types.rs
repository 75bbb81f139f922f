//! Records moving through the ingestion pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A crawled page as produced by the external crawler. Input only; the
/// pipeline never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    /// Fetched URL.
    pub url: String,
    /// Extracted plain text, possibly with residual markup remnants.
    pub content: String,
    /// Domain hint from the crawler, if it already resolved one.
    #[serde(default)]
    pub domain: Option<String>,
    /// Fetch timestamp as recorded by the crawler.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One accepted page, ready for the external sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Derived from the content hash plus ingestion time. Stable for
    /// identical content; two pages with the same normalized content
    /// collapse to one document.
    pub document_id: String,
    pub url: String,
    /// Canonical URL when it differs from `url`, otherwise `None`.
    pub canonical_url: Option<String>,
    pub title: String,
    pub domain: String,
    pub description: Option<String>,
    /// Tag such as "tutorial", "documentation", "discussion", "general".
    pub content_type: String,
    /// Topic tags, most prominent first.
    pub categories: Vec<String>,
    /// Highest score first, capped by configuration.
    pub keywords: Vec<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
    pub author_name: Option<String>,
    /// Domain boost times content-type boost, capped at 3.0.
    pub quality_score: f64,
    pub word_count: usize,
}

/// A bounded, sentence-respecting slice of a document's text.
///
/// Chunks of a document, concatenated in `chunk_index` order, reconstruct
/// the normalized text with only whitespace loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// `document_id` plus the chunk index.
    pub chunk_id: String,
    pub document_id: String,
    pub text: String,
    /// Section headings in effect where this chunk starts, outermost first.
    pub relevant_headings: Vec<String>,
    /// 0-based, contiguous within a document.
    pub chunk_index: usize,
    pub word_count: usize,
}

/// Aggregate counters for one batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    pub pages_seen: usize,
    pub documents_accepted: usize,
    pub duplicates_removed: usize,
    pub empty_removed: usize,
    pub non_english_removed: usize,
    pub failed: usize,
    pub chunks_emitted: usize,
    pub low_quality_chunks_removed: usize,
    pub avg_chunk_words: f64,
    pub median_chunk_words: f64,
}

impl BatchStats {
    /// Fill the chunk word-count summary fields from the emitted chunks.
    pub fn finish_chunk_summary(&mut self, chunk_word_counts: &mut Vec<usize>) {
        if chunk_word_counts.is_empty() {
            self.avg_chunk_words = 0.0;
            self.median_chunk_words = 0.0;
            return;
        }
        let total: usize = chunk_word_counts.iter().sum();
        self.avg_chunk_words = total as f64 / chunk_word_counts.len() as f64;
        chunk_word_counts.sort_unstable();
        let mid = chunk_word_counts.len() / 2;
        self.median_chunk_words = if chunk_word_counts.len() % 2 == 0 {
            (chunk_word_counts[mid - 1] + chunk_word_counts[mid]) as f64 / 2.0
        } else {
            chunk_word_counts[mid] as f64
        };
    }
}
