//! Content-hash deduplication.
//!
//! The seen-hash set is the only cross-page state in the pipeline. It sits
//! behind the narrow `SeenHashes` trait so the process-local set can be
//! swapped for a sharded or external store without touching pipeline logic.
//! The set grows for the lifetime of a run; duplicates must be caught across
//! the whole corpus, not just the current batch, so there is no eviction.

use std::collections::HashSet;

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 content hash of normalized text.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Narrow interface over the seen-hash set.
pub trait SeenHashes: Send + Sync {
    /// Whether the hash was already recorded.
    fn seen(&self, hash: &str) -> bool;

    /// Record the hash. Returns `true` when it was newly inserted, `false`
    /// when it was already present. Check-and-insert happens in one step so
    /// first-seen-wins holds when callers race.
    fn insert(&self, hash: &str) -> bool;

    /// Number of distinct hashes recorded.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local seen-hash set guarded by a mutex.
#[derive(Default)]
pub struct MemorySeenHashes {
    seen: Mutex<HashSet<String>>,
}

impl MemorySeenHashes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenHashes for MemorySeenHashes {
    fn seen(&self, hash: &str) -> bool {
        self.seen.lock().contains(hash)
    }

    fn insert(&self, hash: &str) -> bool {
        self.seen.lock().insert(hash.to_string())
    }

    fn len(&self) -> usize {
        self.seen.lock().len()
    }
}
