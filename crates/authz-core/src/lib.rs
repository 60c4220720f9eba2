//! Synchronization engine and configuration for authz-schema-sync
//!
//! Ties the other crates together: [`load_model`] reads and parses the
//! schema, [`SyncConfig`] describes a project, and [`SyncEngine`] checks
//! (and optionally rewrites) every generated output against the model.

pub mod config;
pub mod diff;
pub mod error;
pub mod sync;

pub use authz_codegen::OutputSpec;
pub use config::SyncConfig;
pub use error::{Error, OutputError, Result};
pub use sync::{Evaluation, OutputReport, SyncEngine, SyncOptions, SyncReport, SyncVerdict};

use authz_fs::{NormalizedPath, io};
use authz_schema::SchemaModel;

/// Read and parse the schema at `path`.
///
/// Any syntax or model error aborts here, before outputs are looked at.
pub fn load_model(path: &NormalizedPath) -> Result<SchemaModel> {
    let text = match io::read_text(path) {
        Ok(text) => text,
        Err(e) if e.is_not_found() => {
            return Err(Error::SchemaNotFound {
                path: path.to_native(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let model = authz_schema::parse_schema(&text).map_err(|source| Error::Schema {
        path: path.to_native(),
        source,
    })?;
    tracing::debug!(schema = %path, resource_types = model.resource_types.len(), "Loaded schema");
    Ok(model)
}
