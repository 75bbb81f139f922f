//! Output sink contract.
//!
//! The sink owns durability and indexing. It reports success or failure per
//! item, not per batch, so the orchestrator can surface partial-success
//! statistics.

use serde::Serialize;
use websift_core::{Chunk, Document};

/// Outcome of handing one record to the sink.
#[derive(Debug, Clone, Serialize)]
pub struct SinkOutcome {
    /// `document_id` or `chunk_id` of the record.
    pub item_id: String,
    pub ok: bool,
    pub error: Option<String>,
}

impl SinkOutcome {
    pub fn accepted(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            ok: true,
            error: None,
        }
    }

    pub fn rejected(item_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// Destination for finished documents and chunks.
pub trait DocumentSink {
    /// Accept a batch of records, reporting one outcome per record in
    /// order: documents first, then chunks.
    fn accept(&mut self, documents: &[Document], chunks: &[Chunk]) -> Vec<SinkOutcome>;
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub documents: Vec<Document>,
    pub chunks: Vec<Chunk>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentSink for MemorySink {
    fn accept(&mut self, documents: &[Document], chunks: &[Chunk]) -> Vec<SinkOutcome> {
        let mut outcomes = Vec::with_capacity(documents.len() + chunks.len());
        for doc in documents {
            outcomes.push(SinkOutcome::accepted(doc.document_id.clone()));
        }
        for chunk in chunks {
            outcomes.push(SinkOutcome::accepted(chunk.chunk_id.clone()));
        }
        self.documents.extend_from_slice(documents);
        self.chunks.extend_from_slice(chunks);
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(id: &str) -> Document {
        Document {
            document_id: id.to_string(),
            url: "https://example.com".into(),
            canonical_url: None,
            title: "t".into(),
            domain: "example.com".into(),
            description: None,
            content_type: "general".into(),
            categories: Vec::new(),
            keywords: Vec::new(),
            published_date: None,
            modified_date: None,
            author_name: None,
            quality_score: 1.0,
            word_count: 1,
        }
    }

    #[test]
    fn test_memory_sink_accepts_all() {
        let mut sink = MemorySink::new();
        let outcomes = sink.accept(&[document("a"), document("b")], &[]);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.ok));
        assert_eq!(sink.documents.len(), 2);
    }
}
