//! WebSift Core — shared records, pipeline configuration, errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use types::{BatchStats, Chunk, Document, RawPage};
