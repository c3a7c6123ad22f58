use std::path::PathBuf;

/// Failures at the configuration boundary. Scoring itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rules: {0}")]
    InvalidRules(String),
}

pub type Result<T> = std::result::Result<T, Error>;
