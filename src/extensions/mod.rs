//! Native extension configuration and building
//!
//! Configures and compiles the C++ sources of a Python extension module:
//! - source discovery (`discover`)
//! - per-toolchain flag adaptation (`flags`)
//! - platform-specific link library names (`libraries`)
//! - toolchain invocation (`compiler`)
//!
//! `ExtensionBuilder` ties these together for each declared target.

pub mod builder;
pub mod compiler;
pub mod discover;
pub mod flags;
pub mod libraries;
pub mod toolchain;
pub mod types;

pub use builder::{ExtensionBuilder, preview_flags};
pub use compiler::{CommandLine, Compiler};
pub use discover::{ConfigurationError, FileSet, discover, discover_all};
pub use flags::{FlagSet, MSVC_EXCEPTION_FLAG, STRICT_PROTOTYPES_FLAG, adapt};
pub use libraries::{
    DEFAULT_WINDOWS_SUFFIX, LibraryNameSet, OPENCV_LIBRARIES, resolve_libraries,
    resolve_libraries_with_suffix,
};
pub use toolchain::{SourceLanguage, ToolchainIdentity};
pub use types::{BuildPlan, BuildResult, DEFAULT_EXTENSION_NAME, ExtensionSpec};
