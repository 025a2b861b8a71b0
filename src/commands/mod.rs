//! Subcommand implementations

use crate::TargetArgs;
use anyhow::{Context, Result};
use stasm_build::{BuildSettings, Config, ExtensionSpec, Overrides};
use std::path::PathBuf;

pub(crate) mod build;
pub(crate) mod completion;
pub(crate) mod flags;
pub(crate) mod libraries;
pub(crate) mod plan;
pub(crate) mod sources;

/// Options that apply to every subcommand
#[derive(Debug, Clone, Default)]
pub(crate) struct GlobalOptions {
    pub(crate) config: Option<PathBuf>,
    pub(crate) no_config: bool,
}

impl GlobalOptions {
    /// Load the config file selected on the command line (or the defaults)
    pub(crate) fn load_config(&self) -> Result<Config> {
        Config::load_with_options(self.config.as_deref(), self.no_config)
            .context("Failed to load configuration")
    }
}

impl TargetArgs {
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            toolchain: self.toolchain.clone(),
            platform: self.platform.clone(),
            numpy_include: self.numpy_include.clone(),
            no_python: self.no_python,
            ..Overrides::default()
        }
    }
}

/// First declared extension; commands that inspect one target use it
pub(crate) fn primary_extension(config: &Config) -> ExtensionSpec {
    stasm_build::config::extensions(config)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Resolve settings for the planning commands
pub(crate) fn resolve_settings(global: &GlobalOptions, overrides: &Overrides) -> Result<BuildSettings> {
    let config = global.load_config()?;
    Ok(BuildSettings::resolve(overrides, &config))
}
