//! Build command
//!
//! Configure every extension, then compile and link it

use super::{GlobalOptions, resolve_settings};
use crate::TargetArgs;
use anyhow::{Context, Result};
use stasm_build::ExtensionBuilder;
use std::path::PathBuf;

/// Build-only options
#[derive(Debug, Clone, Default)]
pub(crate) struct BuildOptions {
    pub(crate) out_dir: Option<PathBuf>,
    pub(crate) build_temp: Option<PathBuf>,
    pub(crate) dry_run: bool,
    pub(crate) verbose: bool,
}

/// Build every configured extension.
///
/// Configuration errors abort before anything is compiled. A toolchain
/// failure stops the build and reports the toolchain's own output.
pub(crate) fn run(global: &GlobalOptions, target: &TargetArgs, options: BuildOptions) -> Result<()> {
    let mut overrides = target.overrides();
    overrides.out_dir = options.out_dir;
    overrides.build_temp = options.build_temp;

    let verbose = options.verbose || stasm_build::env_vars::verbose();
    let settings = resolve_settings(global, &overrides)?;
    let builder = ExtensionBuilder::new(settings, verbose, options.dry_run);

    let plans = builder
        .plan_all()
        .context("Failed to configure extension build")?;

    let results = builder.build_many(&plans);
    let (successful, failed, duration) = ExtensionBuilder::summarize(&results);

    for result in &results {
        if result.success {
            if verbose && !result.output.is_empty() {
                print!("{}", result.output);
            }
            if !options.dry_run {
                println!("Built {} in {:.2}s", result.extension, result.duration.as_secs_f64());
            }
        } else {
            eprint!("{}", result.output);
        }
    }

    if failed > 0 {
        let message = results
            .iter()
            .find_map(|r| r.error.clone())
            .unwrap_or_else(|| "unknown error".to_string());
        anyhow::bail!("Extension build failed: {message}");
    }

    if !options.dry_run {
        println!(
            "{successful} extension(s) built in {:.2}s",
            duration.as_secs_f64()
        );
    }

    Ok(())
}
