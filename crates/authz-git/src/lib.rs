//! Version-control queries for authz-schema-sync
//!
//! Only used to tell "never existed" apart from "exists but untracked" when
//! reporting on generated files; sync verdicts never depend on it.

pub mod error;
pub mod tracking;

pub use error::{Error, Result};
pub use tracking::{GitTracker, TrackingState};
