//! Compiler flag adaptation
//!
//! The Stasm sources are C++, but the Python extension machinery configures
//! the compiler with C defaults. Two adjustments fix that up:
//! - MSVC needs `/EHsc` for standard C++ exception handling
//! - GCC-style compilers inherit `-Wstrict-prototypes` from the interpreter's
//!   CFLAGS, which only applies to C and warns on every C++ unit
//!
//! Adaptation runs on one target's own [`FlagSet`]; nothing here touches a
//! shared compiler object, so flags never leak into unrelated targets.

use super::toolchain::{SourceLanguage, ToolchainIdentity};
use serde::{Deserialize, Serialize};

/// MSVC switch enabling standard C++ exception semantics
pub const MSVC_EXCEPTION_FLAG: &str = "/EHsc";

/// C-only warning that GCC rejects for C++ translation units
pub const STRICT_PROTOTYPES_FLAG: &str = "-Wstrict-prototypes";

/// Ordered list of compiler arguments
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet(Vec<String>);

impl FlagSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Split a whitespace-separated flag string such as `$CFLAGS`
    #[must_use]
    pub fn parse(flags: &str) -> Self {
        Self(flags.split_whitespace().map(str::to_string).collect())
    }

    pub fn push(&mut self, flag: impl Into<String>) {
        self.0.push(flag.into());
    }

    /// Append a flag only if it is not already present
    pub fn push_unique(&mut self, flag: &str) {
        if !self.contains(flag) {
            self.0.push(flag.to_string());
        }
    }

    /// Remove every occurrence of `flag` (absent flags are ignored)
    pub fn remove(&mut self, flag: &str) {
        self.0.retain(|f| f != flag);
    }

    pub fn extend<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(flags.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn contains(&self, flag: &str) -> bool {
        self.0.iter().any(|f| f == flag)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for FlagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a FlagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<FlagSet> for Vec<String> {
    fn from(flags: FlagSet) -> Self {
        flags.0
    }
}

/// Adapt a target's compiler flags to the selected toolchain
///
/// - `Msvc`: append `/EHsc` (at most once)
/// - Unix-style compiling C++: strip `-Wstrict-prototypes`
/// - anything else: flags pass through unchanged
///
/// Idempotent: adapting an already adapted set returns it unchanged.
///
/// # Example
///
/// ```
/// use stasm_build::extensions::{FlagSet, SourceLanguage, ToolchainIdentity, adapt};
///
/// let base = FlagSet::parse("-Wstrict-prototypes -O2");
/// let flags = adapt(&ToolchainIdentity::Unix, base, SourceLanguage::Cpp);
/// assert_eq!(flags.as_slice(), ["-O2"]);
/// ```
#[must_use]
pub fn adapt(toolchain: &ToolchainIdentity, base_flags: FlagSet, language: SourceLanguage) -> FlagSet {
    let mut flags = base_flags;

    match toolchain {
        ToolchainIdentity::Msvc => {
            flags.push_unique(MSVC_EXCEPTION_FLAG);
        }
        ToolchainIdentity::Unix | ToolchainIdentity::Mingw32 | ToolchainIdentity::Cygwin => {
            if language == SourceLanguage::Cpp && flags.contains(STRICT_PROTOTYPES_FLAG) {
                crate::debug!("Removing {STRICT_PROTOTYPES_FLAG} for C++ ({toolchain})");
                flags.remove(STRICT_PROTOTYPES_FLAG);
            }
        }
        ToolchainIdentity::Other(name) => {
            crate::debug!("No flag adaptation for toolchain '{name}'");
        }
    }

    flags
}
