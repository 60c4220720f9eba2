//! Shared test utilities for the authz-schema-sync workspace.
//!
//! Dev-dependency only; never published.
//!
//! # Modules
//!
//! - [`schemas`]: schema source fixtures
//! - [`project`]: [`TestProject`](project::TestProject) temp-dir builder
//! - [`git`]: git repository fixtures

pub mod git;
pub mod project;
pub mod schemas;
