//! Shared test helpers and utilities

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the stasm-build binary built for this test run
#[allow(dead_code)]
pub(crate) fn get_stasm_build_binary() -> String {
    env!("CARGO_BIN_EXE_stasm-build").to_string()
}

/// Create a temporary source tree with the given files (empty contents)
///
/// # Arguments
/// * `files` - Paths relative to the temp root, e.g. `src/sub/b.cpp`
#[allow(dead_code)]
pub(crate) fn create_source_tree(files: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    for file in files {
        let file_path = dir.path().join(file);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create source directory");
        }
        fs::write(&file_path, "").expect("Failed to write source file");
    }

    dir
}

/// Write a `.stasm-build.toml` into `dir` pointing the Stasm extension at `source_root`
///
/// # Returns
/// The path to the created config file
#[allow(dead_code)]
pub(crate) fn write_config(dir: &Path, source_root: &Path, extra: &str) -> PathBuf {
    let config_path = dir.join(".stasm-build.toml");
    let content = format!(
        "probe_python = false\n{extra}\n\n[[extension]]\nname = \"stasm._stasm\"\nsource_root = {:?}\n",
        source_root.to_string_lossy()
    );
    fs::write(&config_path, content).expect("Failed to write config");
    config_path
}
