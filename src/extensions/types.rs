//! Extension target definitions
//!
//! An [`ExtensionSpec`] is what the project declares (where the sources live,
//! what to link). A [`BuildPlan`] is the frozen result of configuring that
//! target for one toolchain and platform. A [`BuildResult`] records what
//! happened when the toolchain ran.

use super::discover::FileSet;
use super::flags::FlagSet;
use super::libraries::{LibraryNameSet, OPENCV_LIBRARIES};
use super::toolchain::{SourceLanguage, ToolchainIdentity};
use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dotted module name of the Stasm extension
pub const DEFAULT_EXTENSION_NAME: &str = "stasm._stasm";

/// A declared extension target
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtensionSpec {
    /// Dotted Python module name (e.g., "stasm._stasm")
    pub name: String,

    /// Directory walked for sources and headers
    pub source_root: PathBuf,

    /// Glob patterns selecting compilation units
    pub sources: Vec<String>,

    /// Glob patterns selecting headers the target depends on
    ///
    /// Defaults to `*.h` plus the `*.mh` fragments. The fragments are
    /// `#include`d by the sources, so a change to one rebuilds the target
    /// just like a `.h` change. Set `["*.h"]` to track plain headers only.
    pub headers: Vec<String>,

    pub language: SourceLanguage,

    /// Unversioned library names to link against
    pub libraries: Vec<String>,

    pub include_dirs: Vec<PathBuf>,

    pub library_dirs: Vec<PathBuf>,

    /// Extra compiler arguments for this target only
    pub extra_compile_args: Vec<String>,

    /// Extra linker arguments for this target only
    pub extra_link_args: Vec<String>,
}

impl Default for ExtensionSpec {
    fn default() -> Self {
        Self {
            name: DEFAULT_EXTENSION_NAME.to_string(),
            source_root: PathBuf::from("src"),
            sources: vec!["*.cpp".to_string()],
            headers: vec!["*.h".to_string(), "*.mh".to_string()],
            language: SourceLanguage::Cpp,
            libraries: OPENCV_LIBRARIES.iter().map(ToString::to_string).collect(),
            include_dirs: Vec::new(),
            library_dirs: Vec::new(),
            extra_compile_args: Vec::new(),
            extra_link_args: Vec::new(),
        }
    }
}

impl ExtensionSpec {
    /// Base library list as declared (before platform decoration)
    #[must_use]
    pub fn library_names(&self) -> LibraryNameSet {
        self.libraries.iter().map(String::as_str).collect()
    }

    /// Output file for this module under `out_dir`
    ///
    /// `stasm._stasm` becomes `<out_dir>/stasm/_stasm.so` (`.pyd` on Windows).
    #[must_use]
    pub fn output_path(&self, out_dir: &Path, platform: &Platform) -> PathBuf {
        let mut path = out_dir.to_path_buf();
        let mut parts = self.name.split('.').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                path.push(part);
            } else {
                path.push(format!("{part}.{}", platform.extension_suffix()));
            }
        }
        path
    }
}

/// Fully configured target, ready to hand to the toolchain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub name: String,
    pub toolchain: ToolchainIdentity,
    pub platform: Platform,
    pub language: SourceLanguage,
    pub source_root: PathBuf,
    /// Compilation units
    pub sources: FileSet,
    /// Headers; a change to any of them invalidates the build
    pub depends: FileSet,
    /// Adapted compiler flags (scoped to this target)
    pub flags: FlagSet,
    pub link_args: FlagSet,
    /// Platform-resolved link libraries
    pub libraries: LibraryNameSet,
    pub include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    /// Loadable module produced by the link step
    pub output: PathBuf,
}

/// Result of building an extension
#[derive(Debug)]
pub struct BuildResult {
    /// Extension module name
    pub extension: String,

    /// Whether the build succeeded
    pub success: bool,

    /// Build duration
    pub duration: std::time::Duration,

    /// Error message if failed
    pub error: Option<String>,

    /// Toolchain output (stdout + stderr)
    pub output: String,
}

impl BuildResult {
    /// Create a successful build result
    #[must_use]
    pub const fn success(extension: String, duration: std::time::Duration, output: String) -> Self {
        Self {
            extension,
            success: true,
            duration,
            error: None,
            output,
        }
    }

    /// Create a failed build result
    #[must_use]
    pub const fn failure(
        extension: String,
        duration: std::time::Duration,
        error: String,
        output: String,
    ) -> Self {
        Self {
            extension,
            success: false,
            duration,
            error: Some(error),
            output,
        }
    }
}
