//! Toolchain invocation
//!
//! Turns a [`BuildPlan`] into compiler and linker command lines and runs
//! them. It's the equivalent of what the Python build machinery does after
//! configuration:
//! ```bash
//! c++ -c src/stasm.cpp -o build/temp/stasm.o -O2 -fPIC -I...   # per source
//! c++ -shared build/temp/*.o -o build/lib/stasm/_stasm.so -lopencv_core ...
//! ```
//! Compiler and linker failures are reported with the toolchain's own output.

use super::toolchain::{SourceLanguage, ToolchainIdentity};
use super::types::{BuildPlan, BuildResult};
use crate::platform::Platform;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

/// One program invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Compiler driver for one toolchain
///
/// Renders the commands for a plan and, unless in dry-run mode, executes them
/// one at a time, stopping at the first failure.
#[derive(Debug)]
pub struct Compiler {
    /// Compiler executable
    compiler: String,
    /// Linker executable (the compiler itself for GCC-style toolchains)
    linker: String,
    /// Enable verbose output
    verbose: bool,
    /// Print commands instead of running them
    dry_run: bool,
}

impl Compiler {
    /// Create a compiler driver for a toolchain.
    ///
    /// Priority order for the executable:
    /// 1. `CXX` (C++) or `CC` (C) environment variable
    /// 2. The toolchain's conventional driver name
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognized toolchain when no compiler is set in the environment.
    pub fn new(
        toolchain: &ToolchainIdentity,
        language: SourceLanguage,
        verbose: bool,
        dry_run: bool,
    ) -> Result<Self> {
        let from_env = match language {
            SourceLanguage::Cpp => crate::env_vars::cxx(),
            SourceLanguage::C => crate::env_vars::cc(),
        };

        let compiler = match (from_env, toolchain) {
            (Some(program), _) => program,
            (None, ToolchainIdentity::Msvc) => "cl".to_string(),
            (None, ToolchainIdentity::Unix) => default_gcc_driver(language, "c++", "cc"),
            (None, ToolchainIdentity::Mingw32 | ToolchainIdentity::Cygwin) => {
                default_gcc_driver(language, "g++", "gcc")
            }
            (None, ToolchainIdentity::Other(name)) => {
                anyhow::bail!(
                    "No compiler known for toolchain '{name}'. Set {} to the compiler to use.",
                    if language == SourceLanguage::Cpp { "CXX" } else { "CC" }
                )
            }
        };

        let linker = if toolchain.is_windows_native() {
            "link".to_string()
        } else {
            compiler.clone()
        };

        Ok(Self {
            compiler,
            linker,
            verbose,
            dry_run,
        })
    }

    #[must_use]
    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    /// Object file path for a source, mirroring its place under the source root
    #[must_use]
    pub fn object_path(plan: &BuildPlan, source: &Path, build_temp: &Path) -> PathBuf {
        let relative = source
            .strip_prefix(&plan.source_root)
            .ok()
            .map_or_else(|| PathBuf::from(source.file_name().unwrap_or_default()), Path::to_path_buf);

        let object_ext = if plan.toolchain.is_windows_native() { "obj" } else { "o" };
        build_temp.join(relative).with_extension(object_ext)
    }

    /// Compile command for one source file
    #[must_use]
    pub fn compile_command(&self, plan: &BuildPlan, source: &Path, object: &Path) -> CommandLine {
        let mut cmd = CommandLine::new(&self.compiler);

        if plan.toolchain.is_windows_native() {
            let source_switch = match plan.language {
                SourceLanguage::Cpp => "/Tp",
                SourceLanguage::C => "/Tc",
            };
            cmd.arg("/c")
                .arg(format!("{source_switch}{}", source.display()))
                .arg(format!("/Fo{}", object.display()))
                .args(plan.flags.iter().cloned())
                .args(plan.include_dirs.iter().map(|dir| format!("/I{}", dir.display())));
        } else {
            cmd.arg("-c")
                .arg(source.display().to_string())
                .arg("-o")
                .arg(object.display().to_string())
                .args(plan.flags.iter().cloned())
                .args(plan.include_dirs.iter().map(|dir| format!("-I{}", dir.display())));
        }

        cmd
    }

    /// Link command producing the loadable module
    #[must_use]
    pub fn link_command(&self, plan: &BuildPlan, objects: &[PathBuf]) -> CommandLine {
        let mut cmd = CommandLine::new(&self.linker);

        if plan.toolchain.is_windows_native() {
            cmd.args(["/nologo", "/DLL"])
                .args(objects.iter().map(|o| o.display().to_string()))
                .arg(format!("/OUT:{}", plan.output.display()))
                .args(plan.library_dirs.iter().map(|dir| format!("/LIBPATH:{}", dir.display())))
                .args(plan.libraries.iter().map(|lib| format!("{lib}.lib")));
        } else {
            // Python symbols resolve at load time on macOS
            if plan.platform == Platform::MacOs {
                cmd.args(["-bundle", "-undefined", "dynamic_lookup"]);
            } else {
                cmd.arg("-shared");
            }
            cmd.args(objects.iter().map(|o| o.display().to_string()))
                .arg("-o")
                .arg(plan.output.display().to_string())
                .args(plan.library_dirs.iter().map(|dir| format!("-L{}", dir.display())))
                .args(plan.libraries.iter().map(|lib| format!("-l{lib}")));
        }

        cmd.args(plan.link_args.iter().cloned());
        cmd
    }

    /// Every command needed to build a plan, in execution order
    #[must_use]
    pub fn commands(&self, plan: &BuildPlan, build_temp: &Path) -> Vec<CommandLine> {
        let mut objects = Vec::with_capacity(plan.sources.len());
        let mut commands = Vec::with_capacity(plan.sources.len() + 1);

        for source in &plan.sources {
            let object = Self::object_path(plan, source, build_temp);
            commands.push(self.compile_command(plan, source, &object));
            objects.push(object);
        }

        commands.push(self.link_command(plan, &objects));
        commands
    }

    /// Build an extension.
    ///
    /// # Returns
    /// `BuildResult` with build status, duration, and output
    #[must_use]
    pub fn build(&self, plan: &BuildPlan, build_temp: &Path) -> BuildResult {
        let start_time = Instant::now();
        let mut output = String::new();

        if self.verbose {
            println!("Building extension {}", plan.name);
            println!("  toolchain: {} ({})", plan.toolchain, plan.platform);
            println!("  sources: {}", plan.sources.len());
            println!("  output: {}", plan.output.display());
        }

        let commands = self.commands(plan, build_temp);

        if self.dry_run {
            for command in &commands {
                println!("{command}");
            }
            return BuildResult::success(plan.name.clone(), start_time.elapsed(), output);
        }

        if let Err(e) = Self::prepare_dirs(plan, build_temp) {
            return BuildResult::failure(
                plan.name.clone(),
                start_time.elapsed(),
                format!("{e:#}"),
                output,
            );
        }

        for command in &commands {
            if self.verbose {
                println!("  Running: {command}");
            }

            let result = command.to_command().output();

            let command_output = match result {
                Ok(out) => out,
                Err(e) => {
                    return BuildResult::failure(
                        plan.name.clone(),
                        start_time.elapsed(),
                        format!("Failed to run {}: {e}", command.program),
                        output,
                    );
                }
            };

            output.push_str(&String::from_utf8_lossy(&command_output.stdout));
            output.push_str(&String::from_utf8_lossy(&command_output.stderr));

            if !command_output.status.success() {
                return BuildResult::failure(
                    plan.name.clone(),
                    start_time.elapsed(),
                    format!(
                        "{} failed with exit code: {}",
                        command.program,
                        command_output
                            .status
                            .code()
                            .map_or_else(|| "unknown".to_string(), |c| c.to_string())
                    ),
                    output,
                );
            }
        }

        BuildResult::success(plan.name.clone(), start_time.elapsed(), output)
    }

    /// Create the object directories and the output's parent directory
    fn prepare_dirs(plan: &BuildPlan, build_temp: &Path) -> Result<()> {
        for source in &plan.sources {
            let object = Self::object_path(plan, source, build_temp);
            if let Some(parent) = object.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create build directory: {}", parent.display())
                })?;
            }
        }

        if let Some(parent) = plan.output.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }

        Ok(())
    }
}

fn default_gcc_driver(language: SourceLanguage, cxx: &str, cc: &str) -> String {
    match language {
        SourceLanguage::Cpp => cxx.to_string(),
        SourceLanguage::C => cc.to_string(),
    }
}
