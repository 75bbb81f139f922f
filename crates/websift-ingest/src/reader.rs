//! Raw page batch loading.
//!
//! Batches arrive as newline-delimited JSON or a single JSON array. A
//! malformed line is skipped and logged; it never aborts the batch, matching
//! the pipeline's per-page failure policy.

use std::fs;
use std::path::Path;

use tracing::warn;
use websift_core::{RawPage, Result};

/// Load a batch of raw pages from an NDJSON or JSON-array file.
pub fn read_raw_pages(path: &Path) -> Result<Vec<RawPage>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_raw_pages(&contents))
}

/// Parse NDJSON or JSON-array page batches from a string.
pub fn parse_raw_pages(contents: &str) -> Vec<RawPage> {
    let trimmed = contents.trim_start();
    if trimmed.starts_with('[') {
        match serde_json::from_str::<Vec<RawPage>>(trimmed) {
            Ok(pages) => return pages,
            Err(e) => {
                warn!("Failed to parse JSON array batch: {e}");
                return Vec::new();
            }
        }
    }

    let mut pages = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<RawPage>(line) {
            Ok(page) => pages.push(page),
            Err(e) => warn!("Skipping malformed page on line {}: {e}", line_no + 1),
        }
    }
    pages
}
