//! Build environment variable handling.
//!
//! Only the driver reads these; the adapter and discoverer receive plain values.

use std::env;

// Helper for boolean environment variables that accept "1", "true", "yes"
fn is_enabled(var: &str) -> bool {
    env::var(var).ok().is_some_and(|s| parse_bool(&s))
}

fn parse_bool(value: &str) -> bool {
    let s = value.to_lowercase();
    s == "1" || s == "true" || s == "yes"
}

// Build target selection

/// Get the toolchain identity override (`STASM_TOOLCHAIN`, e.g. "msvc").
pub fn toolchain() -> Option<String> {
    env::var("STASM_TOOLCHAIN").ok().filter(|s| !s.is_empty())
}

/// Get the target platform override (`STASM_PLATFORM`, e.g. "windows").
pub fn platform() -> Option<String> {
    env::var("STASM_PLATFORM").ok().filter(|s| !s.is_empty())
}

/// Get the version suffix for Windows library names (`STASM_WINDOWS_LIB_SUFFIX`).
pub fn windows_library_suffix() -> Option<String> {
    env::var("STASM_WINDOWS_LIB_SUFFIX").ok()
}

/// Get explicit config file path (`STASM_BUILD_CONFIG`).
pub fn config_path() -> Option<String> {
    env::var("STASM_BUILD_CONFIG").ok()
}

/// Check if verbose build output is requested (`STASM_BUILD_VERBOSE`).
pub fn verbose() -> bool {
    is_enabled("STASM_BUILD_VERBOSE")
}

// Compiler and linker (same names the Python build machinery honors)

/// Get C compiler (useful for cross-compilation).
pub fn cc() -> Option<String> {
    env::var("CC").ok()
}

/// Get C++ compiler (useful for cross-compilation).
pub fn cxx() -> Option<String> {
    env::var("CXX").ok()
}

/// Get C compiler flags.
pub fn cflags() -> Option<String> {
    env::var("CFLAGS").ok()
}

/// Get C++ compiler flags.
pub fn cxxflags() -> Option<String> {
    env::var("CXXFLAGS").ok()
}

/// Get linker flags.
pub fn ldflags() -> Option<String> {
    env::var("LDFLAGS").ok()
}

// Python environment

/// Get Python interpreter used to probe include paths (`PYTHON`).
pub fn python() -> Option<String> {
    env::var("PYTHON").ok().filter(|s| !s.is_empty())
}

/// Get numpy include directory override (`NUMPY_INCLUDE`).
pub fn numpy_include() -> Option<String> {
    env::var("NUMPY_INCLUDE").ok().filter(|s| !s.is_empty())
}

/// Get colon-separated (`;` on Windows) extra include directories (`STASM_INCLUDE_PATH`).
pub fn include_path() -> Option<Vec<String>> {
    env::var("STASM_INCLUDE_PATH").ok().map(|s| split_path_list(&s))
}

/// Get colon-separated (`;` on Windows) extra library directories (`STASM_LIBRARY_PATH`).
pub fn library_path() -> Option<Vec<String>> {
    env::var("STASM_LIBRARY_PATH").ok().map(|s| split_path_list(&s))
}

fn split_path_list(value: &str) -> Vec<String> {
    let separator = if cfg!(windows) { ';' } else { ':' };
    value
        .split(separator)
        .filter(|s| !s.is_empty())
        .map(std::string::ToString::to_string)
        .collect()
}
