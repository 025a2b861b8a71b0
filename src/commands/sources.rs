//! Sources and headers commands
//!
//! List the files a build would compile or depend on

use super::{GlobalOptions, primary_extension};
use anyhow::{Context, Result};
use stasm_build::extensions::discover_all;
use std::path::{Path, PathBuf};

/// Print every file under the root matching the patterns, one per line.
pub(crate) fn run(global: &GlobalOptions, root: Option<PathBuf>, patterns: &[String]) -> Result<()> {
    let spec = primary_extension(&global.load_config()?);
    let root = root.unwrap_or(spec.source_root);

    let patterns: Vec<&str> = if patterns.is_empty() {
        spec.sources.iter().map(String::as_str).collect()
    } else {
        patterns.iter().map(String::as_str).collect()
    };

    print_matches(&root, &patterns)
}

/// Print the headers of the primary extension, one per line.
pub(crate) fn run_headers(global: &GlobalOptions, root: Option<PathBuf>) -> Result<()> {
    let spec = primary_extension(&global.load_config()?);
    let root = root.unwrap_or(spec.source_root);
    let patterns: Vec<&str> = spec.headers.iter().map(String::as_str).collect();

    print_matches(&root, &patterns)
}

fn print_matches(root: &Path, patterns: &[&str]) -> Result<()> {
    let files = discover_all(root, patterns)
        .with_context(|| format!("Failed to discover {} under {}", patterns.join(", "), root.display()))?;

    for file in &files {
        println!("{}", file.display());
    }

    Ok(())
}
