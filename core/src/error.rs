use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("corpus directory not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("malformed document {}: {reason}", .path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("query contains no search terms")]
    EmptyQuery,

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Per-document failures skip the document instead of aborting the scan.
    pub fn is_document_local(&self) -> bool {
        matches!(self, Error::MalformedDocument { .. } | Error::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
