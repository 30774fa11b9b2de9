//! Filtering walked files into a match list, and reporting it.

use crate::error::SweepError;
use crate::patterns::{MatchCriteria, Verdict};
use crate::walker::walk_files;

use colored::Colorize;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Options controlling scan behavior (runtime flags)
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanOptions {
    pub verbose: bool,
    pub calculate_sizes: bool,
}

/// Files selected for deletion, in traversal order.
///
/// Only `filter` and `scan` build one, so every path in it satisfied the
/// criteria it was built with. The count is always the length of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    paths: Vec<PathBuf>,
}

impl MatchSet {
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Keep the paths that end with a listed extension and contain no ignore
/// substring. Pure: the filesystem is not consulted.
pub fn filter<I>(paths: I, criteria: &MatchCriteria) -> MatchSet
where
    I: IntoIterator<Item = PathBuf>,
{
    MatchSet {
        paths: paths
            .into_iter()
            .filter(|path| criteria.is_match(path))
            .collect(),
    }
}

/// Walk `root` completely and filter the result.
///
/// Any traversal error aborts the scan; a partial match list is never
/// returned.
pub fn scan(
    root: &Path,
    criteria: &MatchCriteria,
    options: ScanOptions,
) -> Result<MatchSet, SweepError> {
    if options.verbose {
        println!("DEBUG: Scanning directory {}", root.display());
    }

    let progress = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        progress.set_style(style);
    }
    progress.enable_steady_tick(Duration::from_millis(100));

    let mut files = Vec::new();
    for entry in walk_files(root)? {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                progress.finish_and_clear();
                return Err(err);
            }
        };

        if options.verbose {
            trace_verdict(&path, criteria.classify(&path));
        }

        files.push(path);
        if files.len() % 100 == 0 {
            progress.set_message(format!("Scanning: {} files visited", files.len()));
        }
    }

    progress.finish_and_clear();

    Ok(filter(files, criteria))
}

fn trace_verdict(path: &Path, verdict: Verdict<'_>) {
    match verdict {
        Verdict::Matched => println!("DEBUG: Matched {}", path.display()),
        Verdict::Ignored(substring) => println!(
            "DEBUG: Skipping {} (path contains '{}')",
            path.display(),
            substring
        ),
        Verdict::NoExtension => println!("DEBUG: No extension match: {}", path.display()),
    }
}

/// Size of a matched file, without following symlinks
fn file_size(path: &Path) -> u64 {
    match fs::symlink_metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            eprintln!(
                "Warning: Could not get metadata for {}: {}",
                path.display(),
                err
            );
            0
        }
    }
}

/// Write the listing followed by the count.
///
/// With `calculate_sizes` each line carries the file size and the total is
/// printed after the count.
pub fn write_report<W: Write>(
    out: &mut W,
    matches: &MatchSet,
    options: ScanOptions,
) -> io::Result<()> {
    writeln!(out, "List of files:")?;

    let mut total_bytes = 0u64;
    for path in matches {
        if options.calculate_sizes {
            let size = file_size(path);
            total_bytes += size;
            writeln!(out, "{} ({})", path.display(), format_size(size, BINARY))?;
        } else {
            writeln!(out, "{}", path.display())?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Number of files: {}",
        matches.count().to_string().bold()
    )?;
    if options.calculate_sizes {
        writeln!(
            out,
            "Total size: {}",
            format_size(total_bytes, BINARY).bold()
        )?;
    }

    Ok(())
}
