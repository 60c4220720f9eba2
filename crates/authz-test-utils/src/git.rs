//! Git repository fixtures.

use std::path::Path;

/// Initialises a real git repository using `git2` (no commits).
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Stages `relative` into the index so git treats it as tracked.
///
/// # Panics
/// Panics if the file cannot be added or the index cannot be written.
pub fn track_file(repo: &git2::Repository, relative: &str) {
    let mut index = repo
        .index()
        .unwrap_or_else(|e| panic!("track_file: failed to open index: {e}"));
    index
        .add_path(Path::new(relative))
        .unwrap_or_else(|e| panic!("track_file: failed to add {relative}: {e}"));
    index
        .write()
        .unwrap_or_else(|e| panic!("track_file: failed to write index: {e}"));
}
