use stasm_build::extensions::{MSVC_EXCEPTION_FLAG, resolve_libraries_with_suffix};
use stasm_build::{
    FlagSet, LibraryNameSet, Platform, SourceLanguage, ToolchainIdentity, adapt, resolve_libraries,
};

#[test]
fn unix_drops_strict_prototypes() {
    let base = FlagSet::parse("-Wstrict-prototypes -O2");

    let flags = adapt(&ToolchainIdentity::Unix, base, SourceLanguage::Cpp);

    assert_eq!(flags.as_slice(), ["-O2"]);
}

#[test]
fn unix_adaptation_twice_equals_once() {
    let base = FlagSet::parse("-g -Wstrict-prototypes -fwrapv -O2");

    let once = adapt(&ToolchainIdentity::Unix, base, SourceLanguage::Cpp);
    let twice = adapt(&ToolchainIdentity::Unix, once.clone(), SourceLanguage::Cpp);

    assert_eq!(once, twice);
}

#[test]
fn msvc_from_empty_flags() {
    let flags = adapt(&ToolchainIdentity::Msvc, FlagSet::new(), SourceLanguage::Cpp);

    assert_eq!(flags.as_slice(), ["/EHsc"]);
}

#[test]
fn msvc_flag_never_duplicated() {
    let mut flags = FlagSet::new();
    for _ in 0..5 {
        flags = adapt(&ToolchainIdentity::Msvc, flags, SourceLanguage::Cpp);
    }

    assert_eq!(
        flags.iter().filter(|f| f.as_str() == MSVC_EXCEPTION_FLAG).count(),
        1
    );
}

#[test]
fn toolchain_strings_from_build_driver() {
    let flags = FlagSet::parse("-Wstrict-prototypes");

    let unknown: ToolchainIdentity = "intelw".parse().unwrap();
    assert_eq!(adapt(&unknown, flags.clone(), SourceLanguage::Cpp), flags);

    let mingw: ToolchainIdentity = "mingw32".parse().unwrap();
    assert!(adapt(&mingw, flags, SourceLanguage::Cpp).is_empty());
}

#[test]
fn windows_libraries_are_versioned_in_order() {
    let base: LibraryNameSet = ["A", "B", "C"].into_iter().collect();

    let libs = resolve_libraries(&base, &Platform::Windows);

    assert_eq!(libs.as_slice(), ["A300", "B300", "C300"]);
}

#[test]
fn non_windows_libraries_unchanged() {
    let base = LibraryNameSet::opencv();

    for tag in ["linux", "darwin", "freebsd", "sunos5"] {
        let platform: Platform = tag.parse().unwrap();
        assert_eq!(resolve_libraries(&base, &platform), base);
    }
}

#[test]
fn configurable_windows_suffix() {
    let libs = resolve_libraries_with_suffix(&LibraryNameSet::opencv(), &Platform::Windows, "411");

    assert_eq!(
        libs.as_slice(),
        ["opencv_core411", "opencv_imgproc411", "opencv_objdetect411"]
    );
}
