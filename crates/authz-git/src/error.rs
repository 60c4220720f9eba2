//! Error types for authz-git

use std::path::PathBuf;

/// Result type for authz-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in authz-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository at {path} has no working directory")]
    BareRepository { path: PathBuf },

    #[error("Cannot resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is outside the repository at {workdir}")]
    OutsideRepository { path: PathBuf, workdir: PathBuf },
}
