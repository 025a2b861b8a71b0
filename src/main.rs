//! stasm-build command-line interface
//!
//! Configures and builds the Stasm Python extension against OpenCV

use clap::{Parser, Subcommand};
use stasm_build::SourceLanguage;
use std::path::PathBuf;
use std::process;

/// Display an error with optional backtrace information
fn display_error(err: &anyhow::Error, backtrace_enabled: bool) {
    eprintln!("error: {err}");

    // Show error chain
    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }

    if backtrace_enabled {
        let backtrace = err.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            eprintln!("\nBacktrace:");
            eprintln!("{backtrace}");
        }
    }
}

#[derive(Parser)]
#[command(name = "stasm-build")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Configure and build the Stasm Python extension", long_about = None)]
pub(crate) struct Cli {
    /// Print debug information to stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Show a backtrace on errors (requires `RUST_BACKTRACE=1`)
    #[arg(long, global = true)]
    backtrace: bool,

    /// Path to a config file (default: .stasm-build.toml)
    #[arg(long, global = true, env = "STASM_BUILD_CONFIG")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    no_config: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Target selection shared by the planning commands
#[derive(clap::Args, Debug, Clone, Default)]
pub(crate) struct TargetArgs {
    /// Toolchain identity (unix, msvc, mingw32, cygwin, ...)
    #[arg(long)]
    toolchain: Option<String>,

    /// Target platform (linux, windows, macos, ...)
    #[arg(long)]
    platform: Option<String>,

    /// numpy header directory (skips probing Python for it)
    #[arg(long)]
    numpy_include: Option<PathBuf>,

    /// Do not run the Python interpreter to probe include paths or flags
    #[arg(long)]
    no_python: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List compilable sources found under a directory
    Sources {
        /// Directory to walk (default: the first extension's source root)
        #[arg(long)]
        root: Option<PathBuf>,

        /// File name pattern; repeat for several (default: *.cpp)
        #[arg(long)]
        pattern: Vec<String>,
    },

    /// List headers the extension depends on
    Headers {
        /// Directory to walk (default: the first extension's source root)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Show compiler flags after adaptation for a toolchain
    ///
    /// Base flags can be passed after `--`; otherwise the resolved defaults are used.
    Flags {
        #[command(flatten)]
        target: TargetArgs,

        /// Language being compiled
        #[arg(long, value_enum, default_value_t = SourceLanguage::Cpp)]
        language: SourceLanguage,

        /// Base flags to adapt
        #[arg(last = true)]
        flags: Vec<String>,
    },

    /// Show link libraries resolved for a platform
    Libraries {
        /// Target platform (linux, windows, macos, ...)
        #[arg(long)]
        platform: Option<String>,

        /// Version suffix used on Windows (default: 300)
        #[arg(long)]
        suffix: Option<String>,

        /// Base library names (default: the OpenCV modules)
        names: Vec<String>,
    },

    /// Show the full build plan for every extension
    Plan {
        #[command(flatten)]
        target: TargetArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile and link every extension
    Build {
        #[command(flatten)]
        target: TargetArgs,

        /// Directory for linked modules (default: build/lib)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Directory for object files (default: build/temp)
        #[arg(long)]
        build_temp: Option<PathBuf>,

        /// Print the commands without running them
        #[arg(long)]
        dry_run: bool,

        /// Enable verbose output including toolchain logs
        #[arg(long, short)]
        verbose: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    stasm_build::init_debug(cli.debug);

    let global = commands::GlobalOptions {
        config: cli.config,
        no_config: cli.no_config,
    };

    let result = match cli.command {
        Commands::Sources { root, pattern } => commands::sources::run(&global, root, &pattern),
        Commands::Headers { root } => commands::sources::run_headers(&global, root),
        Commands::Flags {
            target,
            language,
            flags,
        } => commands::flags::run(&global, &target, language, flags),
        Commands::Libraries {
            platform,
            suffix,
            names,
        } => commands::libraries::run(&global, platform.as_deref(), suffix.as_deref(), names),
        Commands::Plan { target, json } => commands::plan::run(&global, &target, json),
        Commands::Build {
            target,
            out_dir,
            build_temp,
            dry_run,
            verbose,
        } => commands::build::run(
            &global,
            &target,
            commands::build::BuildOptions {
                out_dir,
                build_temp,
                dry_run,
                verbose,
            },
        ),
        Commands::Completion { shell } => commands::completion::run(shell),
    };

    if let Err(e) = result {
        display_error(&e, cli.backtrace);
        process::exit(1);
    }
}

mod commands;
