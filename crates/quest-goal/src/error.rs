// error.rs — Error types for the goal tracking subsystem.

use thiserror::Error;

/// Errors that can occur during tracker and store operations.
///
/// None of these are fatal to the program: the menu loop reports the
/// error and regains control. No operation is retried automatically.
#[derive(Debug, Error)]
pub enum QuestError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The snapshot document itself could not be read as JSON.
    /// Individual bad goal records are skipped, not raised as this.
    #[error("malformed snapshot: {0}")]
    Format(#[from] serde_json::Error),

    /// The snapshot file does not exist. Callers proceed with an
    /// empty tracker.
    #[error("snapshot not found: {path}")]
    NotFound { path: String },

    /// A goal index was outside `[0, len)`.
    #[error("goal index {index} out of range (have {len} goals)")]
    Index { index: usize, len: usize },

    /// User-supplied input failed validation (re-prompted, not fatal).
    #[error("invalid input: {0}")]
    Validation(String),
}
