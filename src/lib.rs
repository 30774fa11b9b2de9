//! cleandistro - selective bulk deletion by file extension
//!
//! cleandistro walks a directory tree, selects every file whose path ends with
//! one of the requested suffixes and contains none of the ignore substrings,
//! lists the selection, and deletes exactly that list once the user confirms.
//!
//! ## Flow
//!
//! `walker` (every regular file) → `scanner::filter` (match list) →
//! `scanner::write_report` → `deleter::confirm` → `ApprovedDeletion::execute`.
//!
//! Deletion is only reachable through an `ApprovedDeletion`, and structural
//! errors (`SweepError`) abort before anything is removed. Per-file removal
//! failures are collected in the `DeleteOutcome` instead.

pub mod deleter;
pub mod error;
pub mod patterns;
pub mod scanner;
pub mod walker;

// Re-export commonly used items
pub use deleter::{
    confirm, is_affirmative, ApprovedDeletion, Confirmation, DeleteOutcome, ItemOutcome,
};
pub use error::{DeletionError, RootProblem, SweepError};
pub use patterns::{
    load_presets, resolve_presets, ExtensionSet, IgnoreSet, MatchCriteria, Preset, Verdict,
};
pub use scanner::{filter, scan, write_report, MatchSet, ScanOptions};
pub use walker::{collect_files, walk_files, FileWalk};
