//! Batch orchestration: raw pages in, documents and chunks out.
//!
//! Stage order per page: language gate, normalization, deduplication,
//! chunking, keyword extraction, scoring, quality filter. Every stage except
//! the dedup set is a pure function over its inputs, so pages are
//! independent; the seen-hash set is the single shared-mutable point and is
//! reached only through [`SeenHashes`]. A failing page is counted and
//! skipped; it never aborts the batch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use websift_core::{BatchStats, Chunk, Document, Error, PipelineConfig, RawPage, Result};

use crate::chunking::{chunk_text, ChunkDraft};
use crate::classify::{classify_categories, classify_content_type};
use crate::dedup::{content_hash, MemorySeenHashes, SeenHashes};
use crate::keywords::extract_keywords;
use crate::language::detect_language;
use crate::metadata::extract_page_meta;
use crate::normalize::normalize;
use crate::scoring::{domain_of, total_boost};
use crate::sink::{DocumentSink, SinkOutcome};

/// Everything a batch run produces.
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub documents: Vec<Document>,
    pub chunks: Vec<Chunk>,
    pub stats: BatchStats,
}

/// The ingestion pipeline. Holds configuration and the seen-hash set; all
/// other state is per-page.
pub struct IngestPipeline {
    config: PipelineConfig,
    seen: Box<dyn SeenHashes>,
    cancel: Option<Arc<AtomicBool>>,
}

impl IngestPipeline {
    /// Build a pipeline with a process-local dedup set. Fails on invalid
    /// configuration; nothing else here is fatal.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_seen_hashes(config, Box::new(MemorySeenHashes::new()))
    }

    /// Build a pipeline over a caller-supplied dedup set, e.g. a sharded or
    /// externally backed implementation.
    pub fn with_seen_hashes(config: PipelineConfig, seen: Box<dyn SeenHashes>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            seen,
            cancel: None,
        })
    }

    /// Install a cooperative cancellation flag, checked between pages.
    /// A page already being processed always runs to completion.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of distinct content hashes recorded so far.
    pub fn seen_hashes(&self) -> usize {
        self.seen.len()
    }

    /// Run a batch of raw pages through the pipeline.
    pub fn process_batch(&self, pages: &[RawPage]) -> BatchOutput {
        let mut output = BatchOutput::default();
        let mut chunk_word_counts: Vec<usize> = Vec::new();

        for page in pages {
            if let Some(flag) = &self.cancel {
                if flag.load(Ordering::Relaxed) {
                    info!(
                        "Batch cancelled after {} of {} pages",
                        output.stats.pages_seen,
                        pages.len()
                    );
                    break;
                }
            }
            output.stats.pages_seen += 1;

            let (document, drafts) = match self.process_page(page) {
                Ok(processed) => processed,
                Err(Error::DuplicateContent(hash)) => {
                    output.stats.duplicates_removed += 1;
                    debug!("Duplicate content, skipping {}: hash={}", page.url, hash);
                    continue;
                }
                Err(Error::EmptyContent) => {
                    output.stats.empty_removed += 1;
                    debug!("Empty or too-short content, skipping {}", page.url);
                    continue;
                }
                Err(Error::LanguageRejected(url)) => {
                    output.stats.non_english_removed += 1;
                    debug!("Non-English content, skipping {url}");
                    continue;
                }
                Err(e) => {
                    output.stats.failed += 1;
                    warn!("Failed to process {}: {e}", page.url);
                    continue;
                }
            };

            // Quality floor: drop weak chunks, keep the document while at
            // least one chunk survives.
            let mut kept: Vec<ChunkDraft> = Vec::new();
            for draft in drafts {
                let quality = document.quality_score * text_density(&draft);
                if quality < self.config.min_chunk_quality {
                    output.stats.low_quality_chunks_removed += 1;
                    debug!(
                        "Dropping chunk below quality floor ({quality:.2}) from {}",
                        page.url
                    );
                } else {
                    kept.push(draft);
                }
            }
            if kept.is_empty() {
                debug!("All chunks below quality floor, dropping {}", page.url);
                continue;
            }

            for (index, draft) in kept.into_iter().enumerate() {
                chunk_word_counts.push(draft.word_count);
                output.chunks.push(Chunk {
                    chunk_id: format!("{}_{}", document.document_id, index),
                    document_id: document.document_id.clone(),
                    text: draft.text,
                    relevant_headings: draft.relevant_headings,
                    chunk_index: index,
                    word_count: draft.word_count,
                });
                output.stats.chunks_emitted += 1;
            }
            output.stats.documents_accepted += 1;
            output.documents.push(document);
        }

        output.stats.finish_chunk_summary(&mut chunk_word_counts);
        info!(
            "Batch done: {} pages, {} documents, {} chunks, {} duplicates, {} empty, {} non-English, {} failed",
            output.stats.pages_seen,
            output.stats.documents_accepted,
            output.stats.chunks_emitted,
            output.stats.duplicates_removed,
            output.stats.empty_removed,
            output.stats.non_english_removed,
            output.stats.failed,
        );
        output
    }

    /// Run a batch and hand the results to a sink, returning per-item
    /// outcomes alongside the batch output.
    pub fn process_batch_into(
        &self,
        pages: &[RawPage],
        sink: &mut dyn DocumentSink,
    ) -> (BatchOutput, Vec<SinkOutcome>) {
        let output = self.process_batch(pages);
        let outcomes = sink.accept(&output.documents, &output.chunks);
        let rejected = outcomes.iter().filter(|o| !o.ok).count();
        if rejected > 0 {
            warn!("Sink rejected {rejected} of {} items", outcomes.len());
        }
        (output, outcomes)
    }

    /// Transform one page. Pure except for the dedup insert.
    fn process_page(&self, page: &RawPage) -> Result<(Document, Vec<ChunkDraft>)> {
        if page.url.trim().is_empty() {
            return Err(Error::MalformedInput("page has no URL".into()));
        }
        if page.content.trim().is_empty() {
            return Err(Error::MalformedInput(format!("{} has no content", page.url)));
        }

        if detect_language(&page.content, &page.url, self.config.language_threshold).is_none() {
            return Err(Error::LanguageRejected(page.url.clone()));
        }

        let normalized = normalize(&page.content, self.config.min_content_words)
            .ok_or(Error::EmptyContent)?;

        let hash = content_hash(&normalized.text);
        if !self.seen.insert(&hash) {
            return Err(Error::DuplicateContent(hash));
        }

        let drafts = chunk_text(&normalized.text, self.config.max_chunk_chars);
        let keywords = extract_keywords(&normalized.text, self.config.max_keywords);
        let meta = extract_page_meta(&page.content, &page.url);

        let domain = page
            .domain
            .clone()
            .or_else(|| domain_of(&page.url))
            .unwrap_or_else(|| "unknown".to_string());

        let quality_score = total_boost(&page.url, &normalized.title, &normalized.text, &keywords);
        let word_count = normalized.text.split_whitespace().count();
        let document_id = format!("{}-{}", &hash[..16], Utc::now().timestamp());

        let description = meta
            .description
            .or_else(|| Some(leading_snippet(&normalized.text)));

        let document = Document {
            document_id,
            url: page.url.clone(),
            canonical_url: meta.canonical_url,
            title: normalized.title.clone(),
            domain,
            description,
            content_type: classify_content_type(&normalized.title, &normalized.text).to_string(),
            categories: classify_categories(&normalized.text),
            keywords,
            published_date: meta.published_date,
            modified_date: meta.modified_date,
            author_name: meta.author_name,
            quality_score,
            word_count,
        };

        Ok((document, drafts))
    }
}

/// How much of a chunk looks like prose rather than navigation debris.
/// Multiplies the document boost to give the chunk's quality score.
fn text_density(draft: &ChunkDraft) -> f64 {
    let mut density = 1.0;
    if draft.word_count < 10 {
        density *= 0.3;
    } else if draft.word_count < 25 {
        density *= 0.7;
    }
    let chars = draft.text.chars().count().max(1);
    let letters = draft.text.chars().filter(|c| c.is_alphabetic()).count();
    if (letters as f64 / chars as f64) < 0.5 {
        density *= 0.5;
    }
    density
}

fn leading_snippet(text: &str) -> String {
    const SNIPPET_CHARS: usize = 200;
    let snippet: String = text.chars().take(SNIPPET_CHARS).collect();
    snippet.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    /// English prose generator: `n` sentences of common function words so
    /// the language gate passes on lexical signals alone.
    fn english_text(sentences: usize) -> String {
        "The quick brown fox jumps over the lazy dog and runs along the river bank. "
            .repeat(sentences)
            .trim()
            .to_string()
    }

    fn page(url: &str, content: &str) -> RawPage {
        RawPage {
            url: url.to_string(),
            content: content.to_string(),
            domain: None,
            timestamp: None,
        }
    }

    fn pipeline() -> IngestPipeline {
        IngestPipeline::new(PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = PipelineConfig {
            max_chunk_chars: 0,
            ..Default::default()
        };
        assert!(IngestPipeline::new(config).is_err());
    }

    #[test]
    fn test_duplicate_content_collapses() {
        let pipeline = pipeline();
        let article = english_text(36); // ~540 words
        let batch = vec![
            page("https://example.com/a", &article),
            page("https://mirror.example.net/b", &article),
        ];
        let output = pipeline.process_batch(&batch);
        assert_eq!(output.stats.documents_accepted, 1);
        assert_eq!(output.stats.duplicates_removed, 1);
        assert_eq!(output.documents.len(), 1);
    }

    #[test]
    fn test_same_page_twice_yields_one_document() {
        let pipeline = pipeline();
        let p = page("https://example.com/a", &english_text(36));
        let output = pipeline.process_batch(&[p.clone(), p]);
        assert_eq!(output.documents.len(), 1);
        assert_eq!(output.stats.duplicates_removed, 1);
    }

    #[test]
    fn test_short_page_is_empty_not_duplicate() {
        let pipeline = pipeline();
        // 30 words: below the 50-word floor, and never hashed, so feeding
        // it twice reports two empty rejections rather than a duplicate.
        let short = english_text(2);
        let batch = vec![
            page("https://example.com/s1", &short),
            page("https://example.com/s2", &short),
        ];
        let output = pipeline.process_batch(&batch);
        assert_eq!(output.stats.empty_removed, 2);
        assert_eq!(output.stats.duplicates_removed, 0);
        assert_eq!(pipeline.seen_hashes(), 0);
    }

    #[test]
    fn test_cjk_page_rejected() {
        let pipeline = pipeline();
        let cjk = "这是一个完全由中文字符组成的页面，用来验证语言检测门在批处理中的表现。".repeat(5);
        let output = pipeline.process_batch(&[page("https://example.edu/cjk", &cjk)]);
        assert_eq!(output.stats.non_english_removed, 1);
        assert_eq!(output.stats.documents_accepted, 0);
    }

    #[test]
    fn test_malformed_page_counted_not_fatal() {
        let pipeline = pipeline();
        let batch = vec![
            page("https://example.com/empty", "   "),
            page("https://example.com/good", &english_text(36)),
        ];
        let output = pipeline.process_batch(&batch);
        assert_eq!(output.stats.failed, 1);
        assert_eq!(output.stats.documents_accepted, 1);
    }

    #[test]
    fn test_long_document_chunking() {
        let pipeline = pipeline();
        // ~70 sentences, ~5300 chars: three chunks against the 2000-char
        // budget, word counts summing to the document's.
        let long = english_text(70);
        let output = pipeline.process_batch(&[page("https://example.com/long", &long)]);
        assert_eq!(output.documents.len(), 1);
        assert_eq!(output.chunks.len(), 3);

        let doc = &output.documents[0];
        let chunk_words: usize = output.chunks.iter().map(|c| c.word_count).sum();
        assert_eq!(chunk_words, doc.word_count);

        for (i, chunk) in output.chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
            assert_eq!(chunk.chunk_id, format!("{}_{i}", doc.document_id));
            assert_eq!(chunk.document_id, doc.document_id);
        }
    }

    #[test]
    fn test_document_fields_populated() {
        let pipeline = pipeline();
        let content = format!(
            "# Rust Ownership Tutorial\nHow to understand ownership, step 1. {}",
            english_text(40)
        );
        let output =
            pipeline.process_batch(&[page("https://en.wikipedia.org/wiki/Ownership", &content)]);
        assert_eq!(output.documents.len(), 1);

        let doc = &output.documents[0];
        assert_eq!(doc.title, "Rust Ownership Tutorial");
        assert_eq!(doc.domain, "en.wikipedia.org");
        assert!(doc.quality_score >= 2.0);
        assert!(doc.quality_score <= 3.0);
        assert!(!doc.keywords.is_empty());
        assert!(doc.description.is_some());
        assert!(doc.document_id.len() > 16);
    }

    #[test]
    fn test_quality_monotonic_across_domains() {
        let content = english_text(40);
        let tier1 = pipeline()
            .process_batch(&[page("https://en.wikipedia.org/wiki/Foxes", &content)]);
        let unranked = pipeline().process_batch(&[page("https://foxfacts.biz/page", &content)]);
        assert!(
            tier1.documents[0].quality_score >= unranked.documents[0].quality_score,
            "tier-1 domain must never score below an unranked one"
        );
    }

    #[test]
    fn test_cancel_flag_stops_between_pages() {
        let flag = Arc::new(AtomicBool::new(true));
        let pipeline = pipeline().with_cancel_flag(flag);
        let output = pipeline.process_batch(&[page("https://example.com/a", &english_text(36))]);
        assert_eq!(output.stats.pages_seen, 0);
        assert_eq!(output.stats.documents_accepted, 0);
    }

    #[test]
    fn test_sink_receives_everything() {
        let pipeline = pipeline();
        let mut sink = MemorySink::new();
        let batch = vec![page("https://example.com/a", &english_text(70))];
        let (output, outcomes) = pipeline.process_batch_into(&batch, &mut sink);
        assert_eq!(
            outcomes.len(),
            output.documents.len() + output.chunks.len()
        );
        assert!(outcomes.iter().all(|o| o.ok));
        assert_eq!(sink.documents.len(), 1);
        assert_eq!(sink.chunks.len(), output.chunks.len());
    }

    #[test]
    fn test_chunk_stats_summary() {
        let pipeline = pipeline();
        let output = pipeline.process_batch(&[page("https://example.com/a", &english_text(70))]);
        assert!(output.stats.avg_chunk_words > 0.0);
        assert!(output.stats.median_chunk_words > 0.0);
    }
}
