//! SyncEngine implementation

use std::path::Path;

use authz_codegen::{OutputSpec, TemplateRegistry, TemplateRenderer};
use authz_fs::checksum::compute_content_checksum;
use authz_fs::{NormalizedPath, RobustnessConfig, io};
use authz_git::{GitTracker, TrackingState};
use authz_schema::SchemaModel;

use super::report::{Evaluation, OutputReport, SyncReport, SyncVerdict};
use crate::diff::{DiffStats, diff_stats, unified_diff};
use crate::error::OutputError;

/// Options for a sync run
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Write rendered content over missing or stale outputs.
    pub auto_fix: bool,
    /// Fail the run even when every stale output was fixed.
    pub require_review: bool,
    pub robustness: RobustnessConfig,
}

/// Checks outputs against one schema model.
///
/// Outputs are independent: each is rendered, compared and possibly written
/// on its own, and an error on one never stops the others. A created file
/// never passes in the run that created it, so new generated code always
/// goes through review.
pub struct SyncEngine<'a> {
    model: &'a SchemaModel,
    registry: &'a TemplateRegistry,
    options: SyncOptions,
    tracker: Option<GitTracker>,
}

impl<'a> SyncEngine<'a> {
    pub fn new(model: &'a SchemaModel, registry: &'a TemplateRegistry, options: SyncOptions) -> Self {
        Self {
            model,
            registry,
            options,
            tracker: None,
        }
    }

    /// Report git tracking state using the repository containing `start`.
    ///
    /// Git problems are logged and otherwise ignored.
    pub fn with_git_discovery(mut self, start: &Path) -> Self {
        self.tracker = match GitTracker::discover(start) {
            Ok(tracker) => tracker,
            Err(e) => {
                tracing::warn!(error = %e, "Git discovery failed; tracking state unavailable");
                None
            }
        };
        self
    }

    /// Evaluate every output, in order.
    pub fn run(&self, specs: &[OutputSpec]) -> SyncReport {
        let outputs = specs.iter().map(|spec| self.run_one(spec)).collect();
        let report = SyncReport { outputs };
        tracing::debug!(
            outputs = report.outputs.len(),
            success = report.is_success(),
            "Sync run finished"
        );
        report
    }

    fn run_one(&self, spec: &OutputSpec) -> OutputReport {
        let template = match self.registry.resolve(spec) {
            Ok(template) => template,
            Err(e) => {
                return OutputReport {
                    path: spec.path.clone(),
                    template: None,
                    result: Err(e.into()),
                };
            }
        };

        let result = self.evaluate(&spec.path, &template);
        if let Err(e) = &result {
            tracing::debug!(path = %spec.path, error = %e, "Output failed");
        }
        OutputReport {
            path: spec.path.clone(),
            template: Some(template),
            result,
        }
    }

    fn evaluate(&self, path: &NormalizedPath, template: &str) -> Result<Evaluation, OutputError> {
        let rendered = TemplateRenderer::new(self.registry).render(self.model, template)?;
        let rendered_checksum = compute_content_checksum(&rendered);

        let on_disk = match io::read_bytes(path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.into()),
        };

        let (verdict, fixed, diff) = match on_disk {
            None if self.options.auto_fix => {
                self.write(path, &rendered)?;
                tracing::info!(path = %path, "Created output");
                (SyncVerdict::Created, true, None)
            }
            None => (SyncVerdict::Missing, false, None),
            Some(bytes) if bytes == rendered.as_bytes() => (SyncVerdict::InSync, false, None),
            Some(bytes) => {
                let on_disk = String::from_utf8_lossy(&bytes);
                let diff = Diff {
                    text: unified_diff(&on_disk, &rendered, path.as_str()),
                    stats: diff_stats(&on_disk, &rendered),
                };
                let fixed = if self.options.auto_fix {
                    self.write(path, &rendered)?;
                    tracing::info!(path = %path, "Rewrote out-of-sync output");
                    true
                } else {
                    false
                };
                (SyncVerdict::OutOfSync, fixed, Some(diff))
            }
        };

        Ok(Evaluation {
            verdict,
            fixed,
            passed: self.passes(verdict, fixed),
            diff_stats: diff.as_ref().map(|d| d.stats),
            diff: diff.map(|d| d.text),
            tracking: self.tracking_state(path),
            rendered_checksum,
        })
    }

    fn passes(&self, verdict: SyncVerdict, fixed: bool) -> bool {
        match verdict {
            SyncVerdict::InSync => true,
            SyncVerdict::OutOfSync => fixed && !self.options.require_review,
            SyncVerdict::Missing | SyncVerdict::Created => false,
        }
    }

    fn write(&self, path: &NormalizedPath, rendered: &str) -> authz_fs::Result<()> {
        io::write_atomic(path, rendered.as_bytes(), self.options.robustness)
    }

    fn tracking_state(&self, path: &NormalizedPath) -> TrackingState {
        let Some(tracker) = &self.tracker else {
            return TrackingState::NoRepository;
        };
        match tracker.tracking_state(path) {
            Ok(state) => state,
            Err(authz_git::Error::OutsideRepository { .. }) => TrackingState::NoRepository,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Could not query git tracking state");
                TrackingState::NoRepository
            }
        }
    }
}

struct Diff {
    text: String,
    stats: DiffStats,
}
