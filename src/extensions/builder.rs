//! Extension Builder Orchestration
//!
//! Coordinates configuring and building extension targets. For each declared
//! target it discovers sources, adapts a private copy of the compiler flags,
//! resolves link libraries for the platform, then hands the frozen plan to
//! the toolchain.

use super::compiler::Compiler;
use super::discover::{ConfigurationError, discover_all};
use super::flags::{FlagSet, adapt};
use super::libraries::resolve_libraries_with_suffix;
use super::types::{BuildPlan, BuildResult, ExtensionSpec};
use crate::config::BuildSettings;
use std::time::Duration;

/// Extension builder coordinator
///
/// High-level interface for configuring and building extensions. Flags are
/// attached per target: every plan starts from its own copy of the base flags,
/// so one target's adaptation never leaks into another.
#[derive(Debug)]
pub struct ExtensionBuilder {
    settings: BuildSettings,
    /// Enable verbose output
    verbose: bool,
    /// Print commands instead of running them
    dry_run: bool,
}

impl ExtensionBuilder {
    /// Create a new extension builder.
    #[must_use]
    pub const fn new(settings: BuildSettings, verbose: bool, dry_run: bool) -> Self {
        Self {
            settings,
            verbose,
            dry_run,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Configure one target
    ///
    /// Fails if the source root is missing or no compilation unit is found;
    /// a partially discovered target is never returned.
    pub fn plan(&self, spec: &ExtensionSpec) -> Result<BuildPlan, ConfigurationError> {
        let source_patterns: Vec<&str> = spec.sources.iter().map(String::as_str).collect();
        let header_patterns: Vec<&str> = spec.headers.iter().map(String::as_str).collect();

        // Overlapping patterns must not compile (and link) a unit twice
        let sources = discover_all(&spec.source_root, &source_patterns)?.deduplicated();
        if sources.is_empty() {
            return Err(ConfigurationError::NoSources {
                extension: spec.name.clone(),
                root: spec.source_root.clone(),
                patterns: spec.sources.join(", "),
            });
        }
        let depends = discover_all(&spec.source_root, &header_patterns)?;

        let mut flags = self.settings.flags_for(spec.language);
        flags.extend(spec.extra_compile_args.iter().cloned());
        let flags = adapt(&self.settings.toolchain, flags, spec.language);

        let mut link_args = self.settings.link_flags.clone();
        link_args.extend(spec.extra_link_args.iter().cloned());

        let libraries = resolve_libraries_with_suffix(
            &spec.library_names(),
            &self.settings.platform,
            &self.settings.windows_library_suffix,
        );

        let mut include_dirs = spec.include_dirs.clone();
        include_dirs.extend(self.settings.include_dirs.iter().cloned());

        let mut library_dirs = spec.library_dirs.clone();
        library_dirs.extend(self.settings.library_dirs.iter().cloned());

        crate::debug!(
            "Planned {}: {} source(s), {} header(s), flags [{}], libraries [{}]",
            spec.name,
            sources.len(),
            depends.len(),
            flags.as_slice().join(" "),
            libraries.as_slice().join(" ")
        );

        Ok(BuildPlan {
            name: spec.name.clone(),
            toolchain: self.settings.toolchain.clone(),
            platform: self.settings.platform.clone(),
            language: spec.language,
            source_root: spec.source_root.clone(),
            sources,
            depends,
            flags,
            link_args,
            libraries,
            include_dirs,
            library_dirs,
            output: spec.output_path(&self.settings.out_dir, &self.settings.platform),
        })
    }

    /// Configure every declared target, stopping at the first error
    pub fn plan_all(&self) -> Result<Vec<BuildPlan>, ConfigurationError> {
        self.settings
            .extensions
            .iter()
            .map(|spec| self.plan(spec))
            .collect()
    }

    /// Run the toolchain for one plan
    #[must_use]
    pub fn build(&self, plan: &BuildPlan) -> BuildResult {
        let compiler = match Compiler::new(&plan.toolchain, plan.language, self.verbose, self.dry_run)
        {
            Ok(compiler) => compiler,
            Err(e) => {
                return BuildResult::failure(
                    plan.name.clone(),
                    Duration::from_secs(0),
                    format!("Failed to initialize compiler: {e}"),
                    String::new(),
                );
            }
        };

        let build_temp = self.settings.build_temp.join(plan.name.replace('.', "_"));
        compiler.build(plan, &build_temp)
    }

    /// Build plans in order, stopping after the first failure
    ///
    /// # Returns
    /// Results for every plan attempted
    #[must_use]
    pub fn build_many(&self, plans: &[BuildPlan]) -> Vec<BuildResult> {
        let mut results = Vec::with_capacity(plans.len());

        for plan in plans {
            let result = self.build(plan);
            let failed = !result.success;
            results.push(result);
            if failed {
                break;
            }
        }

        results
    }

    /// Get summary statistics
    ///
    /// # Returns
    /// (`successful_count`, `failed_count`, `total_duration`)
    #[must_use]
    pub fn summarize(results: &[BuildResult]) -> (usize, usize, Duration) {
        let successful = results.iter().filter(|r| r.success).count();
        let failed = results.len() - successful;
        let total_duration = results.iter().map(|r| r.duration).sum();

        (successful, failed, total_duration)
    }
}

/// Adapt a flag list the way a plan would, without discovering sources
///
/// Used by the CLI to preview adaptation for arbitrary flags.
#[must_use]
pub fn preview_flags(settings: &BuildSettings, spec: &ExtensionSpec, base: Option<FlagSet>) -> FlagSet {
    let mut flags = base.unwrap_or_else(|| settings.flags_for(spec.language));
    flags.extend(spec.extra_compile_args.iter().cloned());
    adapt(&settings.toolchain, flags, spec.language)
}
