//! Error types for authz-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from authz-core
    #[error(transparent)]
    Core(#[from] authz_core::Error),

    /// Error from authz-codegen
    #[error(transparent)]
    Codegen(#[from] authz_codegen::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
