//! Libraries command
//!
//! Show the link libraries resolved for a target platform

use super::GlobalOptions;
use anyhow::Result;
use stasm_build::LibraryNameSet;
use stasm_build::extensions::resolve_libraries_with_suffix;

/// Print resolved library names, one per line.
pub(crate) fn run(
    global: &GlobalOptions,
    platform: Option<&str>,
    suffix: Option<&str>,
    names: Vec<String>,
) -> Result<()> {
    let config = global.load_config()?;
    let platform = stasm_build::config::platform(platform, &config);
    let suffix = suffix.map_or_else(
        || stasm_build::config::windows_library_suffix(&config),
        str::to_string,
    );

    let base = if names.is_empty() {
        super::primary_extension(&config).library_names()
    } else {
        names.into_iter().collect::<LibraryNameSet>()
    };

    for library in &resolve_libraries_with_suffix(&base, &platform, &suffix) {
        println!("{library}");
    }

    Ok(())
}
