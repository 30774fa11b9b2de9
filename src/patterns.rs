//! Extension and ignore matching, plus the named suffix presets from presets.toml.

use crate::error::SweepError;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Literal, case-sensitive path suffixes that qualify a file for deletion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl ExtensionSet {
    /// Build a set, dropping duplicates and empty strings (an empty suffix
    /// would match every file).
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = ExtensionSet::default();
        set.extend(suffixes);
        set
    }

    pub fn extend<I, S>(&mut self, suffixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for suffix in suffixes {
            let suffix = suffix.into();
            if !suffix.is_empty() && !self.suffixes.contains(&suffix) {
                self.suffixes.push(suffix);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }

    /// True if `path` ends with any suffix in the set
    pub fn matches(&self, path: &str) -> bool {
        self.suffixes.iter().any(|suffix| path.ends_with(suffix.as_str()))
    }
}

/// Substrings that protect any path containing them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    substrings: Vec<String>,
}

impl IgnoreSet {
    /// Build a set, dropping duplicates and empty strings (an empty substring
    /// would protect every file).
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for substring in substrings {
            let substring = substring.into();
            if !substring.is_empty() && !list.contains(&substring) {
                list.push(substring);
            }
        }
        IgnoreSet { substrings: list }
    }

    pub fn is_empty(&self) -> bool {
        self.substrings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.substrings.iter().map(String::as_str)
    }

    /// The first substring found anywhere in `path`, if any
    pub fn find_in(&self, path: &str) -> Option<&str> {
        self.substrings
            .iter()
            .find(|substring| path.contains(substring.as_str()))
            .map(String::as_str)
    }
}

/// Outcome of testing one path against the criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    Matched,
    /// Protected by this ignore substring (checked before extensions)
    Ignored(&'a str),
    NoExtension,
}

/// The extension and ignore sets for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchCriteria {
    pub extensions: ExtensionSet,
    pub ignore: IgnoreSet,
}

impl MatchCriteria {
    pub fn new(extensions: ExtensionSet, ignore: IgnoreSet) -> Self {
        MatchCriteria { extensions, ignore }
    }

    /// Classify `path`. Both tests run on the full path string.
    pub fn classify(&self, path: &Path) -> Verdict<'_> {
        let path_str = path.to_string_lossy();

        if let Some(substring) = self.ignore.find_in(&path_str) {
            return Verdict::Ignored(substring);
        }

        if self.extensions.matches(&path_str) {
            Verdict::Matched
        } else {
            Verdict::NoExtension
        }
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.classify(path) == Verdict::Matched
    }
}

/// A named group of suffixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub suffixes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PresetConfig {
    #[serde(default)]
    description: String,
    suffixes: Vec<String>,
}

// Embed the TOML file directly in the binary at compile time
const PRESETS_TOML: &str = include_str!("../presets.toml");

/// Load every preset, sorted by name
pub fn load_presets() -> Result<Vec<Preset>, SweepError> {
    let config: BTreeMap<String, PresetConfig> = toml::from_str(PRESETS_TOML)?;

    Ok(config
        .into_iter()
        .map(|(name, preset)| Preset {
            name,
            description: preset.description,
            suffixes: preset.suffixes,
        })
        .collect())
}

/// Look up presets by name and return their suffixes in request order
pub fn resolve_presets<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>, SweepError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let presets = load_presets()?;
    let mut suffixes = Vec::new();

    for name in names {
        let name = name.as_ref();
        let preset = presets.iter().find(|p| p.name == name).ok_or_else(|| {
            SweepError::UnknownPreset {
                name: name.to_string(),
                known: presets.iter().map(|p| p.name.clone()).collect(),
            }
        })?;
        suffixes.extend(preset.suffixes.iter().cloned());
    }

    Ok(suffixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(exts: &[&str], ignore: &[&str]) -> MatchCriteria {
        MatchCriteria::new(
            ExtensionSet::new(exts.iter().copied()),
            IgnoreSet::new(ignore.iter().copied()),
        )
    }

    #[test]
    fn suffix_match_is_literal_and_case_sensitive() {
        let c = criteria(&[".dat"], &[]);

        assert!(c.is_match(Path::new("/run/RESLT/soln0.dat")));
        assert!(!c.is_match(Path::new("/run/RESLT/soln0.DAT")));
        assert!(!c.is_match(Path::new("/run/RESLT/soln0.data")));
        assert!(!c.is_match(Path::new("/run/RESLT/dat")));
    }

    #[test]
    fn suffix_without_dot_matches_any_ending() {
        let c = criteria(&["dat"], &[]);

        assert!(c.is_match(Path::new("a.dat")));
        assert!(c.is_match(Path::new("update")));
    }

    #[test]
    fn multi_part_suffixes() {
        let c = criteria(&["tar.gz"], &[]);

        assert!(c.is_match(Path::new("out/build.tar.gz")));
        assert!(!c.is_match(Path::new("out/build.gz")));
    }

    #[test]
    fn ignore_takes_precedence() {
        let c = criteria(&["dat"], &["keepme"]);

        assert_eq!(
            c.classify(Path::new("root/keepme/old.dat")),
            Verdict::Ignored("keepme")
        );
        assert_eq!(c.classify(Path::new("root/a.dat")), Verdict::Matched);
        assert_eq!(c.classify(Path::new("root/b.png")), Verdict::NoExtension);
    }

    #[test]
    fn ignore_checks_the_full_path() {
        let c = criteria(&[".dat"], &["validate"]);

        assert!(!c.is_match(Path::new("demos/validate/RESLT/soln.dat")));
        assert!(!c.is_match(Path::new("demos/odes/validate_soln.dat")));
        assert!(c.is_match(Path::new("demos/odes/RESLT/soln.dat")));
    }

    #[test]
    fn empty_extension_set_matches_nothing() {
        let c = criteria(&[], &[]);
        assert!(!c.is_match(Path::new("a.dat")));

        let c = criteria(&[""], &[]);
        assert!(c.extensions.is_empty());
        assert!(!c.is_match(Path::new("a.dat")));
    }

    #[test]
    fn empty_ignore_substring_is_dropped() {
        let c = criteria(&[".dat"], &["", "keep"]);

        assert_eq!(c.ignore.iter().collect::<Vec<_>>(), vec!["keep"]);
        assert!(c.is_match(Path::new("a.dat")));
    }

    #[test]
    fn duplicate_suffixes_collapse() {
        let mut set = ExtensionSet::new([".dat", ".png", ".dat"]);
        set.extend([".png", ".jpg"]);

        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![".dat", ".png", ".jpg"]);
    }

    #[test]
    fn embedded_presets_parse() {
        let presets = load_presets().expect("embedded presets.toml should parse");
        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["archives", "distro", "images", "results"]);
        assert!(presets.iter().all(|p| !p.suffixes.is_empty()));
    }

    #[test]
    fn distro_preset_covers_the_others() {
        let distro = resolve_presets(&["distro"]).unwrap();
        let parts = resolve_presets(&["results", "images", "archives"]).unwrap();

        for suffix in &parts {
            assert!(distro.contains(suffix), "distro is missing {suffix}");
        }
    }

    #[test]
    fn unknown_preset_lists_known_names() {
        let err = resolve_presets(&["images", "movies"]).unwrap_err();

        match &err {
            SweepError::UnknownPreset { name, known } => {
                assert_eq!(name, "movies");
                assert!(known.contains(&"images".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("movies"));
    }

    #[test]
    fn no_presets_requested_is_empty() {
        let none: [&str; 0] = [];
        assert!(resolve_presets(&none).unwrap().is_empty());
    }
}
