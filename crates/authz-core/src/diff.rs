//! Text diffs between on-disk and freshly rendered output.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// Lines of unchanged context around each hunk.
pub const CONTEXT_LINES: usize = 3;

/// Unified diff from `on_disk` to `rendered`, labelled with `path`.
///
/// Returns an empty string when the inputs are equal.
pub fn unified_diff(on_disk: &str, rendered: &str, path: &str) -> String {
    let diff = TextDiff::from_lines(on_disk, rendered);
    let generated = format!("{path} (generated)");
    let mut unified = diff.unified_diff();
    unified.context_radius(CONTEXT_LINES).header(path, &generated);
    unified.to_string()
}

/// Line counts of a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub insertions: usize,
    pub deletions: usize,
}

pub fn diff_stats(on_disk: &str, rendered: &str) -> DiffStats {
    let diff = TextDiff::from_lines(on_disk, rendered);
    let mut stats = DiffStats::default();
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => stats.insertions += 1,
            ChangeTag::Delete => stats.deletions += 1,
            ChangeTag::Equal => {}
        }
    }
    stats
}
