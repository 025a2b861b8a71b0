//! Flags command
//!
//! Preview how compiler flags are adapted for a toolchain

use super::{GlobalOptions, primary_extension, resolve_settings};
use crate::TargetArgs;
use anyhow::Result;
use stasm_build::extensions::preview_flags;
use stasm_build::{ExtensionSpec, FlagSet, SourceLanguage};

/// Print adapted flags on one line.
///
/// With explicit base flags only those are adapted; otherwise the resolved
/// base flags (config, interpreter, or toolchain defaults) plus `$CFLAGS` are used.
pub(crate) fn run(
    global: &GlobalOptions,
    target: &TargetArgs,
    language: SourceLanguage,
    flags: Vec<String>,
) -> Result<()> {
    let mut overrides = target.overrides();
    if !flags.is_empty() {
        // Explicit flags replace the interpreter's, so skip probing for them
        overrides.no_python = true;
    }

    let settings = resolve_settings(global, &overrides)?;
    let spec = ExtensionSpec {
        language,
        ..primary_extension(&global.load_config()?)
    };

    let base = (!flags.is_empty()).then(|| FlagSet::from_iter(flags));
    let adapted = preview_flags(&settings, &spec, base);

    stasm_build::debug!("Adapted flags for {} ({language})", settings.toolchain);
    println!("{}", adapted.as_slice().join(" "));

    Ok(())
}
