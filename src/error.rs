//! Error kinds for scanning and deletion.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a root directory was rejected before any scan took place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootProblem {
    NotFound,
    NotADirectory,
    Unreadable,
}

impl std::fmt::Display for RootProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RootProblem::NotFound => "does not exist",
            RootProblem::NotADirectory => "is not a directory",
            RootProblem::Unreadable => "cannot be read",
        };
        f.write_str(text)
    }
}

/// Structural errors. Any of these aborts the run before a file is touched.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("root folder '{}' {reason}", .path.display())]
    InvalidRoot { path: PathBuf, reason: RootProblem },

    /// The walk could not finish; whatever was found so far is discarded.
    #[error("failed to traverse '{}'", .root.display())]
    Traversal {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("unknown preset '{name}' (known presets: {})", .known.join(", "))]
    UnknownPreset { name: String, known: Vec<String> },

    #[error("failed to parse embedded preset table")]
    Presets(#[from] toml::de::Error),
}

impl SweepError {
    /// True for the errors raised before traversal started
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, SweepError::InvalidRoot { .. })
    }
}

/// A single file that could not be removed
#[derive(Debug, Error)]
#[error("{}: {source}", .path.display())]
pub struct DeletionError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl DeletionError {
    /// The file was already gone when its turn came
    pub fn is_missing(&self) -> bool {
        self.source.kind() == io::ErrorKind::NotFound
    }
}
