//! Output synchronization
//!
//! [`SyncEngine`] renders every configured output from one model, compares
//! it with what is on disk and, when auto-fix is on, writes it. Results come
//! back as a [`SyncReport`] with one [`OutputReport`] per output.

mod engine;
mod report;

pub use engine::{SyncEngine, SyncOptions};
pub use report::{Evaluation, OutputReport, SyncReport, SyncVerdict};
