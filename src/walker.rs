//! Depth-first enumeration of the regular files below a root directory.

use crate::error::{RootProblem, SweepError};

use ignore::{Walk, WalkBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lazy iterator over every regular file under a root.
///
/// Directories and symbolic links are never yielded. The walk stops at the
/// first traversal error, which is yielded once as `SweepError::Traversal`.
pub struct FileWalk {
    root: PathBuf,
    inner: Walk,
    failed: bool,
}

impl FileWalk {
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for FileWalk {
    type Item = Result<PathBuf, SweepError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for result in self.inner.by_ref() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(SweepError::Traversal {
                        root: self.root.clone(),
                        source: err,
                    }));
                }
            };

            if entry.file_type().is_some_and(|ft| ft.is_file()) {
                return Some(Ok(entry.into_path()));
            }
        }

        None
    }
}

/// Check that `root` is an existing, readable directory
pub fn validate_root(root: &Path) -> Result<(), SweepError> {
    let invalid = |reason| SweepError::InvalidRoot {
        path: root.to_path_buf(),
        reason,
    };

    let metadata = fs::metadata(root).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => invalid(RootProblem::NotFound),
        _ => invalid(RootProblem::Unreadable),
    })?;

    if !metadata.is_dir() {
        return Err(invalid(RootProblem::NotADirectory));
    }

    fs::read_dir(root).map_err(|_| invalid(RootProblem::Unreadable))?;

    Ok(())
}

/// Start walking `root`.
///
/// Every file is a candidate: hidden entries are included and no
/// `.gitignore`/`.ignore` rules are consulted. Entries within a directory are
/// visited in file-name order so repeated walks of an unchanged tree agree.
pub fn walk_files(root: &Path) -> Result<FileWalk, SweepError> {
    validate_root(root)?;

    let inner = WalkBuilder::new(root)
        .hidden(false)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    Ok(FileWalk {
        root: root.to_path_buf(),
        inner,
        failed: false,
    })
}

/// Walk `root` to completion, failing on the first traversal error
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>, SweepError> {
    walk_files(root)?.collect()
}
