//! Error taxonomy for the quiz core
//!
//! Every variant here is recoverable at the operation boundary: an unreadable
//! store degrades to an empty bank, an unreadable document is skipped with a
//! warning, and a validation failure rejects a single candidate without a
//! partial write. Duplicates and the empty-bank condition are signals, not
//! errors (`AppendOutcome::Duplicate`, `SessionEvent::NoQuestionsAvailable`).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The persisted question store is missing or malformed. Callers recover
    /// by treating the bank as empty.
    #[error("question store {path:?} could not be read: {source}")]
    StoreUnreadable {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The store could not be rewritten after a mutation.
    #[error("question store {path:?} could not be written: {source}")]
    StoreUnwritable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A source document could not be read during ingestion. The batch
    /// continues with the remaining files.
    #[error("document {path:?} could not be read: {source}")]
    DocumentUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A manually authored or parsed candidate is missing required fields or
    /// has an inconsistent answer/choices pairing.
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

impl CoreError {
    pub fn store_unreadable(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CoreError::StoreUnreadable {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
