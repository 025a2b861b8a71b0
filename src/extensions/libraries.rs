//! Link-time library name resolution
//!
//! OpenCV ships unversioned shared libraries on Unix (`libopencv_core.so`)
//! but versioned import libraries on Windows (`opencv_core300.lib`).

use crate::platform::Platform;
use serde::{Deserialize, Serialize};

/// OpenCV modules the extension links against
pub const OPENCV_LIBRARIES: [&str; 3] = ["opencv_core", "opencv_imgproc", "opencv_objdetect"];

/// Version token OpenCV 3.0 appends to its Windows library names
pub const DEFAULT_WINDOWS_SUFFIX: &str = "300";

/// Ordered list of external library identifiers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryNameSet(Vec<String>);

impl LibraryNameSet {
    /// The OpenCV base list
    #[must_use]
    pub fn opencv() -> Self {
        OPENCV_LIBRARIES.into_iter().collect()
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

impl<S: Into<String>> FromIterator<S> for LibraryNameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a LibraryNameSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Resolve library names for a target platform using the default suffix
///
/// # Example
///
/// ```
/// use stasm_build::extensions::{LibraryNameSet, resolve_libraries};
/// use stasm_build::platform::Platform;
///
/// let libs = resolve_libraries(&LibraryNameSet::opencv(), &Platform::Windows);
/// assert_eq!(libs.as_slice(), ["opencv_core300", "opencv_imgproc300", "opencv_objdetect300"]);
/// ```
#[must_use]
pub fn resolve_libraries(base_names: &LibraryNameSet, platform: &Platform) -> LibraryNameSet {
    resolve_libraries_with_suffix(base_names, platform, DEFAULT_WINDOWS_SUFFIX)
}

/// Resolve library names, appending `windows_suffix` to each entry on Windows
///
/// Every other platform (including unrecognized ones) gets the base list unchanged.
#[must_use]
pub fn resolve_libraries_with_suffix(
    base_names: &LibraryNameSet,
    platform: &Platform,
    windows_suffix: &str,
) -> LibraryNameSet {
    if platform.is_windows() {
        base_names
            .iter()
            .map(|name| format!("{name}{windows_suffix}"))
            .collect()
    } else {
        base_names.clone()
    }
}
