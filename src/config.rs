//! Configuration file management
//!
//! Reads the project's TOML build configuration and resolves every build
//! setting from, in priority order: command-line overrides, environment
//! variables, the config file, then host defaults.

use crate::extensions::{DEFAULT_WINDOWS_SUFFIX, ExtensionSpec, FlagSet, SourceLanguage, ToolchainIdentity};
use crate::platform::Platform;
use crate::python::PythonProbe;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = ".stasm-build.toml";

/// Build configuration loaded from TOML files
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Toolchain identity ("unix", "msvc", "mingw32", ...)
    pub toolchain: Option<String>,

    /// Target platform tag ("linux", "windows", ...)
    pub platform: Option<String>,

    /// Replaces the interpreter's compiler flags as the starting flag set
    pub base_flags: Option<Vec<String>>,

    /// Version token appended to library names on Windows
    pub windows_library_suffix: Option<String>,

    /// Interpreter used to probe include paths and flags
    pub python: Option<String>,

    /// Skip running the interpreter entirely
    pub probe_python: Option<bool>,

    /// Explicit numpy header directory
    pub numpy_include: Option<PathBuf>,

    /// Include directories shared by every target
    pub include_dirs: Vec<PathBuf>,

    /// Library directories shared by every target
    pub library_dirs: Vec<PathBuf>,

    /// Where linked modules are written
    pub out_dir: Option<PathBuf>,

    /// Where object files are written
    pub build_temp: Option<PathBuf>,

    /// Declared extension targets (defaults to the Stasm extension)
    #[serde(rename = "extension")]
    pub extensions: Vec<ExtensionSpec>,
}

impl Config {
    /// Load configuration from TOML files.
    /// Priority: `STASM_BUILD_CONFIG` -> ./.stasm-build.toml -> ~/.config/stasm-build/config.toml
    ///
    /// # Errors
    ///
    /// Returns an error if config file parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_with_options(None, false)
    }

    /// Load configuration with custom options.
    ///
    /// # Arguments
    /// * `custom_path` - Optional custom path to config file (overrides defaults)
    /// * `skip_rc` - If true, skip loading config files (return default config)
    ///
    /// # Errors
    ///
    /// Returns an error if config file reading or parsing fails.
    pub fn load_with_options(custom_path: Option<&Path>, skip_rc: bool) -> Result<Self> {
        if skip_rc {
            return Ok(Self::default());
        }

        if let Some(path) = custom_path {
            return Self::load_from(path);
        }

        if let Some(path) = crate::env_vars::config_path() {
            return Self::load_from(Path::new(&path));
        }

        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load_from(local);
        }

        if let Some(config_dir) = Self::user_config_dir() {
            let config_path = config_dir.join("config.toml");
            if config_path.is_file() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Parse a config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        crate::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn user_config_dir() -> Option<PathBuf> {
        // Check XDG_CONFIG_HOME first
        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join("stasm-build"));
        }

        // Fall back to ~/.config/stasm-build
        dirs::home_dir().map(|home| home.join(".config").join("stasm-build"))
    }
}

/// Command-line values that take precedence over everything else
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub toolchain: Option<String>,
    pub platform: Option<String>,
    pub numpy_include: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub build_temp: Option<PathBuf>,
    pub no_python: bool,
}

/// Every input the build driver needs, fully resolved
#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub toolchain: ToolchainIdentity,
    pub platform: Platform,
    /// Starting compiler flags before per-target adaptation
    pub base_flags: FlagSet,
    pub link_flags: FlagSet,
    pub windows_library_suffix: String,
    /// Shared include dirs (Python, numpy, configured)
    pub include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub build_temp: PathBuf,
    pub extensions: Vec<ExtensionSpec>,
}

impl BuildSettings {
    /// Resolve settings from overrides, environment, and config
    #[must_use]
    pub fn resolve(overrides: &Overrides, config: &Config) -> Self {
        let platform = platform(overrides.platform.as_deref(), config);
        let toolchain = toolchain(overrides.toolchain.as_deref(), config, &platform);

        let probe = python_probe(overrides, config);
        if let Some(ref probe) = probe {
            crate::debug!("Probing Python interpreter: {}", probe.interpreter());
        }

        let mut include_dirs = Vec::new();
        if let Some(python_include) = probe.as_ref().and_then(PythonProbe::include_dir) {
            include_dirs.push(python_include);
        }
        if let Some(numpy) = numpy_include(overrides.numpy_include.as_deref(), config, probe.as_ref()) {
            include_dirs.push(numpy);
        }
        include_dirs.extend(config.include_dirs.iter().cloned());
        if let Some(extra) = crate::env_vars::include_path() {
            include_dirs.extend(extra.into_iter().map(PathBuf::from));
        }

        let mut library_dirs = config.library_dirs.clone();
        if let Some(extra) = crate::env_vars::library_path() {
            library_dirs.extend(extra.into_iter().map(PathBuf::from));
        }

        Self {
            base_flags: base_flags(config, probe.as_ref(), &toolchain),
            link_flags: crate::env_vars::ldflags()
                .map(|flags| FlagSet::parse(&flags))
                .unwrap_or_default(),
            windows_library_suffix: windows_library_suffix(config),
            include_dirs,
            library_dirs,
            out_dir: overrides
                .out_dir
                .clone()
                .or_else(|| config.out_dir.clone())
                .unwrap_or_else(|| PathBuf::from("build").join("lib")),
            build_temp: overrides
                .build_temp
                .clone()
                .or_else(|| config.build_temp.clone())
                .unwrap_or_else(|| PathBuf::from("build").join("temp")),
            extensions: extensions(config),
            toolchain,
            platform,
        }
    }

    /// Compiler flags for one target language, before adaptation
    ///
    /// Appends `$CFLAGS` (and `$CXXFLAGS` for C++) to the base set.
    #[must_use]
    pub fn flags_for(&self, language: SourceLanguage) -> FlagSet {
        let mut flags = self.base_flags.clone();
        if let Some(cflags) = crate::env_vars::cflags() {
            flags.extend(FlagSet::parse(&cflags).iter().cloned());
        }
        if language == SourceLanguage::Cpp
            && let Some(cxxflags) = crate::env_vars::cxxflags()
        {
            flags.extend(FlagSet::parse(&cxxflags).iter().cloned());
        }
        flags
    }
}

/// Resolve the target platform: CLI -> `STASM_PLATFORM` -> config -> host
#[must_use]
pub fn platform(cli: Option<&str>, config: &Config) -> Platform {
    cli.map(str::to_string)
        .or_else(crate::env_vars::platform)
        .or_else(|| config.platform.clone())
        .map_or_else(Platform::current, Platform::from)
}

/// Resolve the toolchain: CLI -> `STASM_TOOLCHAIN` -> config -> platform default
#[must_use]
pub fn toolchain(cli: Option<&str>, config: &Config, platform: &Platform) -> ToolchainIdentity {
    cli.map(str::to_string)
        .or_else(crate::env_vars::toolchain)
        .or_else(|| config.toolchain.clone())
        .map_or_else(|| ToolchainIdentity::default_for(platform), ToolchainIdentity::from)
}

/// Resolve the Windows library suffix: `STASM_WINDOWS_LIB_SUFFIX` -> config -> "300"
#[must_use]
pub fn windows_library_suffix(config: &Config) -> String {
    crate::env_vars::windows_library_suffix()
        .or_else(|| config.windows_library_suffix.clone())
        .unwrap_or_else(|| DEFAULT_WINDOWS_SUFFIX.to_string())
}

/// Resolve the numpy header directory: CLI -> `NUMPY_INCLUDE` -> config -> interpreter probe
#[must_use]
pub fn numpy_include(
    cli: Option<&Path>,
    config: &Config,
    probe: Option<&PythonProbe>,
) -> Option<PathBuf> {
    cli.map(Path::to_path_buf)
        .or_else(|| crate::env_vars::numpy_include().map(PathBuf::from))
        .or_else(|| config.numpy_include.clone())
        .or_else(|| probe.and_then(PythonProbe::numpy_include))
}

/// Declared targets, or the Stasm extension when none are configured
#[must_use]
pub fn extensions(config: &Config) -> Vec<ExtensionSpec> {
    if config.extensions.is_empty() {
        vec![ExtensionSpec::default()]
    } else {
        config.extensions.clone()
    }
}

/// Starting flags: configured list, else interpreter flags, else toolchain defaults
#[must_use]
pub fn base_flags(
    config: &Config,
    probe: Option<&PythonProbe>,
    toolchain: &ToolchainIdentity,
) -> FlagSet {
    if let Some(ref flags) = config.base_flags {
        return flags.iter().map(String::as_str).collect();
    }

    // The interpreter's flags are GCC-style; MSVC builds use their own defaults
    if toolchain.is_unix_style()
        && let Some(flags) = probe.and_then(PythonProbe::compiler_flags)
    {
        return flags;
    }

    default_flags(toolchain)
}

/// Built-in flags for a toolchain when nothing else supplies them
#[must_use]
pub fn default_flags(toolchain: &ToolchainIdentity) -> FlagSet {
    match toolchain {
        ToolchainIdentity::Unix | ToolchainIdentity::Mingw32 | ToolchainIdentity::Cygwin => {
            FlagSet::from_iter(["-O2", "-fPIC"])
        }
        ToolchainIdentity::Msvc => FlagSet::from_iter(["/nologo", "/Ox", "/MD", "/W3", "/DNDEBUG"]),
        ToolchainIdentity::Other(_) => FlagSet::new(),
    }
}

fn python_probe(overrides: &Overrides, config: &Config) -> Option<PythonProbe> {
    if overrides.no_python || config.probe_python == Some(false) {
        return None;
    }

    Some(
        config
            .python
            .clone()
            .map_or_else(PythonProbe::from_env, PythonProbe::new),
    )
}
