//! WebSift Ingest — normalization, deduplication, chunking, keyword
//! extraction, language detection, quality scoring, batch orchestration.

pub mod chunking;
pub mod classify;
pub mod dedup;
pub mod keywords;
pub mod language;
pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod reader;
pub mod scoring;
pub mod sink;

pub use chunking::{chunk_text, ChunkDraft};
pub use dedup::{content_hash, MemorySeenHashes, SeenHashes};
pub use keywords::extract_keywords;
pub use language::{detect_language, language_stats, LanguageStats};
pub use normalize::{normalize, NormalizedText};
pub use pipeline::{BatchOutput, IngestPipeline};
pub use scoring::{content_type_boost, domain_score, total_boost};
pub use sink::{DocumentSink, MemorySink, SinkOutcome};
