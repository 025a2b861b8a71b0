//! Target platform tags
//!
//! The library-name resolution step only needs to know whether the target is
//! the Windows-native platform, but the tag keeps the common operating systems
//! apart so the build plan can report what it was configured for.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Operating system the extension is being built for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    /// Unrecognized tag; treated like any other non-Windows platform
    Other(String),
}

impl std::str::FromStr for Platform {
    type Err = std::convert::Infallible;

    /// Parse a platform tag (always succeeds; unknown tags return `Other`).
    ///
    /// Accepts Rust `target_os` names as well as the Python `sys.platform`
    /// spellings (`win32`, `darwin`, `linux2`).
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().to_lowercase();

        Ok(match normalized.as_str() {
            "windows" | "win32" | "win64" | "nt" => Self::Windows,
            "macos" | "darwin" | "osx" => Self::MacOs,
            name if name.starts_with("linux") => Self::Linux,
            _ => Self::Other(normalized),
        })
    }
}

impl From<String> for Platform {
    fn from(tag: String) -> Self {
        match tag.parse() {
            Ok(platform) => platform,
            Err(never) => match never {},
        }
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl Platform {
    /// Platform of the running host
    ///
    /// Only the build driver calls this; the adapter receives the tag as input.
    #[must_use]
    pub fn current() -> Self {
        Self::from(env::consts::OS.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Other(tag) => tag,
        }
    }

    /// Check for the Windows-native target
    #[inline]
    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// File suffix of a loadable Python extension module on this platform
    #[must_use]
    pub const fn extension_suffix(&self) -> &'static str {
        match self {
            Self::Windows => "pyd",
            _ => "so",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
