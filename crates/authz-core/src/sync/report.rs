//! Per-output verdicts and the aggregated run report.

use serde::Serialize;

use authz_codegen::TemplateId;
use authz_fs::NormalizedPath;
use authz_git::TrackingState;

use crate::diff::DiffStats;
use crate::error::OutputError;

/// How an output relates to what the schema currently renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncVerdict {
    /// Not on disk; nothing written.
    Missing,
    /// Was not on disk; written this run. Still needs review.
    Created,
    /// On disk and byte-identical.
    InSync,
    /// On disk with different content.
    OutOfSync,
}

impl SyncVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Created => "created",
            Self::InSync => "in sync",
            Self::OutOfSync => "out of sync",
        }
    }
}

impl std::fmt::Display for SyncVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing one output.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub verdict: SyncVerdict,
    /// The rendered content was written to disk this run.
    pub fixed: bool,
    /// Whether this output lets the run succeed.
    pub passed: bool,
    /// Unified diff from disk to rendered content, for `OutOfSync`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    /// Lines added and removed by `diff`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_stats: Option<DiffStats>,
    pub tracking: TrackingState,
    pub rendered_checksum: String,
}

/// Report for one output.
#[derive(Debug)]
pub struct OutputReport {
    pub path: NormalizedPath,
    /// `None` when no template could be resolved.
    pub template: Option<TemplateId>,
    pub result: std::result::Result<Evaluation, OutputError>,
}

impl OutputReport {
    pub fn passed(&self) -> bool {
        matches!(&self.result, Ok(evaluation) if evaluation.passed)
    }

    pub fn verdict(&self) -> Option<SyncVerdict> {
        self.result.as_ref().ok().map(|e| e.verdict)
    }
}

/// All output reports of one run, in configuration order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub outputs: Vec<OutputReport>,
}

impl SyncReport {
    /// True only when every output passed.
    pub fn is_success(&self) -> bool {
        self.outputs.iter().all(OutputReport::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &OutputReport> {
        self.outputs.iter().filter(|o| !o.passed())
    }

    /// Number of outputs with `verdict`.
    pub fn count(&self, verdict: SyncVerdict) -> usize {
        self.outputs
            .iter()
            .filter(|o| o.verdict() == Some(verdict))
            .count()
    }

    /// Number of outputs that ended in an error.
    pub fn error_count(&self) -> usize {
        self.outputs.iter().filter(|o| o.result.is_err()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(verdict: SyncVerdict, passed: bool) -> OutputReport {
        OutputReport {
            path: NormalizedPath::new("out.ts"),
            template: Some("t.jinja".to_string()),
            result: Ok(Evaluation {
                verdict,
                fixed: false,
                passed,
                diff: None,
                diff_stats: None,
                tracking: TrackingState::NoRepository,
                rendered_checksum: "sha256:00".to_string(),
            }),
        }
    }

    #[test]
    fn test_empty_report_succeeds() {
        assert!(SyncReport::default().is_success());
    }

    #[test]
    fn test_any_failure_fails_the_run() {
        let report = SyncReport {
            outputs: vec![
                report(SyncVerdict::InSync, true),
                report(SyncVerdict::Missing, false),
            ],
        };
        assert!(!report.is_success());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.count(SyncVerdict::InSync), 1);
        assert_eq!(report.count(SyncVerdict::Missing), 1);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(SyncVerdict::OutOfSync.to_string(), "out of sync");
    }
}
