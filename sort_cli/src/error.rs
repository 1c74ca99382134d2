use sort_compiler::{BatchError, CodecError, SortExpressionError};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid resist file {path}: {source}")]
    ResistFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{0}")]
    Expression(#[from] SortExpressionError),

    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Batch(#[from] BatchError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("{rejected} of {total} expressions were rejected")]
    BatchRejected { rejected: usize, total: usize },
}
