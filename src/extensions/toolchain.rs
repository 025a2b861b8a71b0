//! Toolchain and source language identities
//!
//! The build driver names the compiler frontend it is about to invoke with a
//! short identity string (`unix`, `msvc`, `mingw32`, ...). Those strings are
//! parsed once into [`ToolchainIdentity`] so the adapter can match on them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compiler frontend selected by the build driver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ToolchainIdentity {
    /// GCC/Clang style `cc` driver
    Unix,
    /// Microsoft Visual C++ (`cl.exe`)
    Msvc,
    /// GCC targeting Windows through `MinGW`
    Mingw32,
    /// GCC under Cygwin
    Cygwin,
    /// Anything not listed above; the adapter leaves these alone
    Other(String),
}

impl std::str::FromStr for ToolchainIdentity {
    type Err = std::convert::Infallible;

    /// Parse a toolchain identity (always succeeds; unknown names return `Other`).
    ///
    /// # Examples
    ///
    /// ```
    /// use stasm_build::extensions::ToolchainIdentity;
    /// use std::str::FromStr;
    ///
    /// assert_eq!(ToolchainIdentity::from_str("MSVC").unwrap(), ToolchainIdentity::Msvc);
    /// assert_eq!(
    ///     ToolchainIdentity::from_str("bcpp").unwrap(),
    ///     ToolchainIdentity::Other("bcpp".into())
    /// );
    /// ```
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_lowercase();

        Ok(match normalized.as_str() {
            "unix" | "gcc" | "clang" => Self::Unix,
            "msvc" | "cl" => Self::Msvc,
            "mingw32" | "mingw" => Self::Mingw32,
            "cygwin" => Self::Cygwin,
            _ => Self::Other(normalized),
        })
    }
}

impl From<String> for ToolchainIdentity {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(identity) => identity,
            Err(never) => match never {},
        }
    }
}

impl From<ToolchainIdentity> for String {
    fn from(identity: ToolchainIdentity) -> Self {
        identity.as_str().to_string()
    }
}

impl ToolchainIdentity {
    /// Identity string as the build driver spells it
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unix => "unix",
            Self::Msvc => "msvc",
            Self::Mingw32 => "mingw32",
            Self::Cygwin => "cygwin",
            Self::Other(name) => name,
        }
    }

    /// GCC-compatible frontends that accept `-W...` style options
    #[inline]
    #[must_use]
    pub const fn is_unix_style(&self) -> bool {
        matches!(self, Self::Unix | Self::Mingw32 | Self::Cygwin)
    }

    /// The Windows-native compiler
    #[inline]
    #[must_use]
    pub const fn is_windows_native(&self) -> bool {
        matches!(self, Self::Msvc)
    }

    /// Default frontend for a platform when nothing else selected one
    #[must_use]
    pub const fn default_for(platform: &crate::platform::Platform) -> Self {
        match platform {
            crate::platform::Platform::Windows => Self::Msvc,
            _ => Self::Unix,
        }
    }
}

impl fmt::Display for ToolchainIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language a translation unit is compiled as
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum SourceLanguage {
    #[serde(rename = "c")]
    #[value(name = "c")]
    C,
    #[default]
    #[serde(rename = "c++", alias = "cpp", alias = "cxx", alias = "C++")]
    #[value(name = "c++", alias = "cpp", alias = "cxx")]
    Cpp,
}

impl std::str::FromStr for SourceLanguage {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "c" => Ok(Self::C),
            "c++" | "cpp" | "cxx" => Ok(Self::Cpp),
            other => Err(format!("unknown source language: {other}")),
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::C => f.write_str("c"),
            Self::Cpp => f.write_str("c++"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    #[test]
    fn parses_known_identities() {
        assert_eq!("unix".parse::<ToolchainIdentity>(), Ok(ToolchainIdentity::Unix));
        assert_eq!("msvc".parse::<ToolchainIdentity>(), Ok(ToolchainIdentity::Msvc));
        assert_eq!(
            " Mingw32 ".parse::<ToolchainIdentity>(),
            Ok(ToolchainIdentity::Mingw32)
        );
        assert_eq!(
            "cygwin".parse::<ToolchainIdentity>(),
            Ok(ToolchainIdentity::Cygwin)
        );
    }

    #[test]
    fn unknown_identity_is_other() {
        let identity: ToolchainIdentity = "bcpp".parse().unwrap();
        assert_eq!(identity, ToolchainIdentity::Other("bcpp".to_string()));
        assert!(!identity.is_unix_style());
        assert!(!identity.is_windows_native());
        assert_eq!(identity.to_string(), "bcpp");
    }

    #[test]
    fn unix_style_frontends() {
        assert!(ToolchainIdentity::Unix.is_unix_style());
        assert!(ToolchainIdentity::Mingw32.is_unix_style());
        assert!(ToolchainIdentity::Cygwin.is_unix_style());
        assert!(!ToolchainIdentity::Msvc.is_unix_style());
    }

    #[test]
    fn default_toolchain_per_platform() {
        assert_eq!(
            ToolchainIdentity::default_for(&Platform::Windows),
            ToolchainIdentity::Msvc
        );
        assert_eq!(
            ToolchainIdentity::default_for(&Platform::Linux),
            ToolchainIdentity::Unix
        );
        assert_eq!(
            ToolchainIdentity::default_for(&Platform::MacOs),
            ToolchainIdentity::Unix
        );
    }

    #[test]
    fn identity_serde_uses_plain_strings() {
        let json = serde_json::to_string(&ToolchainIdentity::Msvc).unwrap();
        assert_eq!(json, "\"msvc\"");

        let parsed: ToolchainIdentity = serde_json::from_str("\"watcom\"").unwrap();
        assert_eq!(parsed, ToolchainIdentity::Other("watcom".to_string()));
    }

    #[test]
    fn parses_languages() {
        assert_eq!("C++".parse::<SourceLanguage>(), Ok(SourceLanguage::Cpp));
        assert_eq!("cxx".parse::<SourceLanguage>(), Ok(SourceLanguage::Cpp));
        assert_eq!("c".parse::<SourceLanguage>(), Ok(SourceLanguage::C));
        assert!("fortran".parse::<SourceLanguage>().is_err());
    }

    #[test]
    fn language_choices_for_the_command_line() {
        use clap::ValueEnum;

        let names: Vec<String> = SourceLanguage::value_variants()
            .iter()
            .filter_map(ValueEnum::to_possible_value)
            .map(|value| value.get_name().to_string())
            .collect();
        assert_eq!(names, ["c", "c++"]);

        assert_eq!(
            <SourceLanguage as ValueEnum>::from_str("cpp", false),
            Ok(SourceLanguage::Cpp)
        );
        assert!(<SourceLanguage as ValueEnum>::from_str("fortran", false).is_err());

        // The default value is rendered through Display and must parse back
        let rendered = SourceLanguage::default().to_string();
        assert_eq!(
            <SourceLanguage as ValueEnum>::from_str(&rendered, false),
            Ok(SourceLanguage::Cpp)
        );
    }
}
