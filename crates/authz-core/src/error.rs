//! Error types for authz-core

use std::path::PathBuf;

/// Result type for authz-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Schema file not found at {path}")]
    SchemaNotFound { path: PathBuf },

    /// The schema failed to parse or validate
    #[error("{path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: authz_schema::Error,
    },

    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("No outputs configured; pass --outputs or add [[outputs]] to the config file")]
    NoOutputs,

    #[error(transparent)]
    Fs(#[from] authz_fs::Error),

    #[error(transparent)]
    Codegen(#[from] authz_codegen::Error),
}

/// Errors confined to a single output; the rest of the batch still runs
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error(transparent)]
    Resolution(#[from] authz_codegen::ResolutionError),

    #[error(transparent)]
    Render(#[from] authz_codegen::RenderError),

    #[error(transparent)]
    Sync(#[from] authz_fs::Error),
}
