//! Confirmation gate and best-effort deletion of a match list.
//!
//! A `MatchSet` can only be deleted after `confirm` turns it into an
//! `ApprovedDeletion`; declining drops it.

use crate::error::DeletionError;
use crate::scanner::MatchSet;

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const PROMPT: &str = "Really delete? [y/n]: ";

/// Answers accepted as "yes" (case-insensitive, surrounding whitespace ignored)
pub const AFFIRMATIVE: &[&str] = &["y", "yes"];

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    AFFIRMATIVE
        .iter()
        .any(|token| answer.eq_ignore_ascii_case(token))
}

/// Result of asking the user
#[derive(Debug)]
pub enum Confirmation {
    Approved(ApprovedDeletion),
    Declined,
}

/// A match list the user agreed to delete
#[derive(Debug)]
pub struct ApprovedDeletion {
    matches: MatchSet,
}

/// Prompt once on `output` and read one line from `input`.
///
/// Anything but an affirmative answer declines, including EOF and I/O errors
/// on either stream. An empty match list is declined without prompting.
pub fn confirm<R, W>(matches: MatchSet, input: &mut R, output: &mut W) -> Confirmation
where
    R: BufRead,
    W: Write,
{
    if matches.is_empty() {
        return Confirmation::Declined;
    }

    if write!(output, "{}", PROMPT).and_then(|_| output.flush()).is_err() {
        return Confirmation::Declined;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(n) if n > 0 && is_affirmative(&answer) => {
            Confirmation::Approved(ApprovedDeletion { matches })
        }
        _ => Confirmation::Declined,
    }
}

/// What happened to one file
#[derive(Debug)]
pub struct ItemOutcome {
    pub path: PathBuf,
    pub result: Result<(), DeletionError>,
}

impl ItemOutcome {
    pub fn is_deleted(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-file results of a deletion pass, in match-list order
#[derive(Debug, Default)]
pub struct DeleteOutcome {
    pub items: Vec<ItemOutcome>,
}

impl DeleteOutcome {
    pub fn attempted(&self) -> usize {
        self.items.len()
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.is_deleted()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeletionError> {
        self.items.iter().filter_map(|item| item.result.as_ref().err())
    }
}

fn remove_one(path: &Path) -> Result<(), DeletionError> {
    fs::remove_file(path).map_err(|source| DeletionError {
        path: path.to_path_buf(),
        source,
    })
}

impl ApprovedDeletion {
    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    /// Delete every file, continuing past failures
    pub fn execute(self) -> DeleteOutcome {
        self.execute_with(|_| {})
    }

    /// Like `execute`, calling `on_item` right after each removal attempt
    pub fn execute_with<F>(self, mut on_item: F) -> DeleteOutcome
    where
        F: FnMut(&ItemOutcome),
    {
        let mut outcome = DeleteOutcome {
            items: Vec::with_capacity(self.matches.count()),
        };

        for path in self.matches.into_paths() {
            let result = remove_one(&path);
            let item = ItemOutcome { path, result };
            on_item(&item);
            outcome.items.push(item);
        }

        outcome
    }
}
