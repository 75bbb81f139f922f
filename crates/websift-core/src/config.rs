//! Pipeline configuration.
//!
//! All thresholds are tuning parameters, not fixed law. The defaults below
//! were chosen empirically against general web crawls; callers with narrower
//! corpora (documentation sites, forums) are expected to adjust them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default minimum word count for a page to survive normalization.
pub const DEFAULT_MIN_CONTENT_WORDS: usize = 50;
/// Default chunk size budget in characters.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 2000;
/// Default cap on keywords per document.
pub const DEFAULT_MAX_KEYWORDS: usize = 10;
/// Default quality floor below which a chunk is dropped.
pub const DEFAULT_MIN_CHUNK_QUALITY: f64 = 0.4;
/// Default combined-score threshold for English acceptance.
pub const DEFAULT_LANGUAGE_THRESHOLD: f64 = 0.3;

/// Tuning knobs for the ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pages with fewer words than this after normalization are rejected.
    pub min_content_words: usize,
    /// Chunk size budget in characters. A single sentence may exceed it.
    pub max_chunk_chars: usize,
    /// Maximum keywords retained per document.
    pub max_keywords: usize,
    /// Chunks scoring below this floor are dropped before emission.
    pub min_chunk_quality: f64,
    /// Combined language score a page must exceed to count as English.
    pub language_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_content_words: DEFAULT_MIN_CONTENT_WORDS,
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            min_chunk_quality: DEFAULT_MIN_CHUNK_QUALITY,
            language_threshold: DEFAULT_LANGUAGE_THRESHOLD,
        }
    }
}

impl PipelineConfig {
    /// Reject configurations that would make the pipeline misbehave.
    ///
    /// Invalid configuration is the only fatal error in this crate; every
    /// per-page failure downstream is counted and skipped instead.
    pub fn validate(&self) -> Result<()> {
        if self.min_content_words == 0 {
            return Err(Error::Config("min_content_words must be positive".into()));
        }
        if self.max_chunk_chars == 0 {
            return Err(Error::Config("max_chunk_chars must be positive".into()));
        }
        if self.max_keywords == 0 {
            return Err(Error::Config("max_keywords must be positive".into()));
        }
        if !(0.0..=3.0).contains(&self.min_chunk_quality) {
            return Err(Error::Config(format!(
                "min_chunk_quality must be within 0.0..=3.0, got {}",
                self.min_chunk_quality
            )));
        }
        if !(0.0..=1.0).contains(&self.language_threshold) {
            return Err(Error::Config(format!(
                "language_threshold must be within 0.0..=1.0, got {}",
                self.language_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = PipelineConfig {
            max_chunk_chars: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let config = PipelineConfig {
            language_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
