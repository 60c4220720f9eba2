//! Tracking-state lookups backed by `git2`.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository, Status};
use serde::Serialize;

use authz_fs::NormalizedPath;

use crate::{Error, Result};

/// How version control currently sees a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingState {
    /// Present in the index (including files deleted from the working tree).
    Tracked,
    /// On disk, unknown to the index and not ignored.
    Untracked,
    /// Neither on disk nor in the index.
    Absent,
    /// Matched by an ignore rule.
    Ignored,
    /// The path is not inside any git working tree.
    NoRepository,
}

impl TrackingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tracked => "tracked",
            Self::Untracked => "untracked",
            Self::Absent => "absent",
            Self::Ignored => "ignored",
            Self::NoRepository => "no repository",
        }
    }
}

impl std::fmt::Display for TrackingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers tracking questions for files inside one repository.
pub struct GitTracker {
    repo: Repository,
    workdir: PathBuf,
}

impl GitTracker {
    /// Discover the repository containing `start`.
    ///
    /// Returns `Ok(None)` when `start` is not inside a git working tree.
    pub fn discover(start: &Path) -> Result<Option<Self>> {
        let repo = match Repository::discover(start) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::debug!(path = %start.display(), "No git repository found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let workdir = repo
            .workdir()
            .ok_or_else(|| Error::BareRepository {
                path: repo.path().to_path_buf(),
            })?;
        let workdir = NormalizedPath::new(workdir)
            .canonicalize()
            .map_err(|source| Error::Resolve {
                path: workdir.to_path_buf(),
                source,
            })?;

        tracing::debug!(workdir = %workdir.display(), "Discovered git repository");
        Ok(Some(Self { repo, workdir }))
    }

    /// Root of the working tree.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Look up the tracking state of `path`, which need not exist.
    pub fn tracking_state(&self, path: &NormalizedPath) -> Result<TrackingState> {
        let absolute = path.canonicalize().map_err(|source| Error::Resolve {
            path: path.to_native(),
            source,
        })?;
        let relative = absolute
            .strip_prefix(&self.workdir)
            .map_err(|_| Error::OutsideRepository {
                path: absolute.clone(),
                workdir: self.workdir.clone(),
            })?;

        match self.repo.status_file(relative) {
            Ok(status) => Ok(classify(status)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(if absolute.exists() {
                TrackingState::Untracked
            } else {
                TrackingState::Absent
            }),
            Err(e) => Err(e.into()),
        }
    }
}

fn classify(status: Status) -> TrackingState {
    if status.is_ignored() {
        TrackingState::Ignored
    } else if status.is_wt_new() {
        TrackingState::Untracked
    } else {
        TrackingState::Tracked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_maps_status_flags() {
        assert_eq!(classify(Status::CURRENT), TrackingState::Tracked);
        assert_eq!(classify(Status::WT_NEW), TrackingState::Untracked);
        assert_eq!(classify(Status::IGNORED), TrackingState::Ignored);
        assert_eq!(classify(Status::INDEX_NEW), TrackingState::Tracked);
        assert_eq!(classify(Status::WT_DELETED), TrackingState::Tracked);
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(TrackingState::NoRepository.to_string(), "no repository");
        assert_eq!(TrackingState::Absent.to_string(), "absent");
    }
}
