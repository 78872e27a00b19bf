//! Output sink trait and error types
//!
//! The sink is the single consistency gate in the pipeline: a record is
//! written only when every field is present.

use crate::record::MovieRecord;
use thiserror::Error;

/// Errors that can occur while committing a record
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write record: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// A gate-keeping destination for extracted records
///
/// Implementations must be safe to share across the worker tasks; concurrent
/// commits may not interleave one record's fields with another's.
pub trait RecordSink: Send + Sync {
    /// Commits the record iff every field is present
    ///
    /// Returns whether a row was written. An incomplete record is discarded
    /// silently with `Ok(false)`.
    fn commit(&self, record: &MovieRecord) -> SinkResult<bool>;
}
