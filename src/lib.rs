//! stasm-build internal library code
//!
//! Configures and builds the `stasm._stasm` Python extension: discovers the
//! C++ sources, adapts compiler flags to the selected toolchain, and resolves
//! OpenCV library names for the target platform.

pub mod config;
pub mod debug;
pub mod env_vars;
pub mod extensions;
pub mod platform;
pub mod python;

// Re-export common types for convenience
pub use config::{BuildSettings, Config, Overrides};
pub use debug::{debug_log, init_debug, is_debug_enabled};
pub use extensions::{
    BuildPlan, BuildResult, ConfigurationError, ExtensionBuilder, ExtensionSpec, FileSet, FlagSet,
    LibraryNameSet, SourceLanguage, ToolchainIdentity, adapt, discover, resolve_libraries,
};
pub use platform::Platform;
pub use python::PythonProbe;
