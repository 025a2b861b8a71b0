//! Source discovery
//!
//! Walks a source tree and collects every file whose name matches a shell
//! glob (`*.cpp`, `*.h`, ...). The walk is best-effort: entries that vanish
//! or become unreadable while it runs are skipped rather than failing the
//! build. Only a missing or unreadable root is an error.

use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that abort build configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Source directory does not exist: {}", path.display())]
    MissingRoot { path: PathBuf },

    #[error("Source path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to read source directory {}: {source}", path.display())]
    UnreadableRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No sources matching {patterns} found for {extension} under {}", root.display())]
    NoSources {
        extension: String,
        root: PathBuf,
        patterns: String,
    },

    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Files matching a pattern under a root, in walk order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FileSet(Vec<PathBuf>);

impl FileSet {
    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.0.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }

    /// Concatenate two sets, keeping order (no de-duplication)
    #[must_use]
    pub fn chain(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Drop repeated paths, keeping the first occurrence of each
    #[must_use]
    pub fn deduplicated(self) -> Self {
        let mut seen = HashSet::with_capacity(self.0.len());
        Self(self.0.into_iter().filter(|path| seen.insert(path.clone())).collect())
    }
}

impl From<Vec<PathBuf>> for FileSet {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for FileSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// fnmatch semantics: `*` matches a leading dot, case folds only on Windows
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: !cfg!(windows),
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Recursively collect files under `root` whose file name matches `pattern`
///
/// Every subdirectory is visited (no depth limit). Links to files are kept;
/// links to directories are not descended.
/// Returned paths are `root` joined with the relative path of each match.
/// Traversal order is platform dependent; callers should rely on membership only.
///
/// # Example
///
/// ```no_run
/// use stasm_build::extensions::discover;
/// use std::path::Path;
///
/// let sources = discover(Path::new("src"), "*.cpp")?;
/// for source in &sources {
///     println!("{}", source.display());
/// }
/// # Ok::<(), stasm_build::extensions::ConfigurationError>(())
/// ```
pub fn discover(root: &Path, pattern: &str) -> Result<FileSet, ConfigurationError> {
    let matcher = Pattern::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    check_root(root)?;

    let mut matches = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Vanished or unreadable mid-walk; skip it
                crate::debug!("Skipping unreadable entry during discovery: {e}");
                continue;
            }
        };

        if !is_regular_file(&entry) {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            crate::debug!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };

        if matcher.matches_with(name, MATCH_OPTIONS) {
            matches.push(entry.into_path());
        }
    }

    crate::debug!(
        "Discovered {} file(s) matching {pattern} under {}",
        matches.len(),
        root.display()
    );

    Ok(FileSet(matches))
}

/// Run [`discover`] once per pattern and concatenate the results
///
/// A file matching several patterns appears once per pattern.
pub fn discover_all(root: &Path, patterns: &[&str]) -> Result<FileSet, ConfigurationError> {
    let mut all = FileSet::default();
    for pattern in patterns {
        all = all.chain(discover(root, pattern)?);
    }
    Ok(all)
}

/// Regular files, plus symlinks whose target is a regular file
///
/// Directory links are never descended; a dangling link is skipped like a
/// vanished entry.
fn is_regular_file(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    if !file_type.is_symlink() {
        return file_type.is_file();
    }

    match fs::metadata(entry.path()) {
        Ok(metadata) => metadata.is_file(),
        Err(e) => {
            crate::debug!("Skipping dangling link {}: {e}", entry.path().display());
            false
        }
    }
}

fn check_root(root: &Path) -> Result<(), ConfigurationError> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigurationError::MissingRoot {
                path: root.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(ConfigurationError::UnreadableRoot {
                path: root.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(ConfigurationError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    fs::read_dir(root).map_err(|source| ConfigurationError::UnreadableRoot {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(())
}
