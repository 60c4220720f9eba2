//! Filesystem primitives for authz-schema-sync
//!
//! Generated outputs are compared byte-for-byte and rewritten atomically, so
//! every read and write in the workspace goes through this crate.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
