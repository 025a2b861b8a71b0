mod common;

use stasm_build::extensions::discover_all;
use stasm_build::{ConfigurationError, discover};
use std::collections::HashSet;
use std::path::PathBuf;

use common::create_source_tree;

#[test]
fn discovers_exactly_matching_sources() {
    let temp = create_source_tree(&["src/a.cpp", "src/sub/b.cpp", "src/readme.md"]);
    let root = temp.path().join("src");

    let files = discover(&root, "*.cpp").unwrap();

    let found: HashSet<PathBuf> = files.iter().cloned().collect();
    let expected: HashSet<PathBuf> = [root.join("a.cpp"), root.join("sub").join("b.cpp")]
        .into_iter()
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn discovers_stasm_headers() {
    let temp = create_source_tree(&[
        "src/stasm.h",
        "src/stasm_lib.h",
        "src/MOD_1/initasm.mh",
        "src/MOD_1/initasm.cpp",
    ]);
    let root = temp.path().join("src");

    let headers = discover_all(&root, &["*.h", "*.mh"]).unwrap();

    assert_eq!(headers.len(), 3);
    assert!(headers.iter().all(|h| {
        h.extension()
            .is_some_and(|ext| ext == "h" || ext == "mh")
    }));
}

#[test]
fn repeated_discovery_has_same_membership() {
    let temp = create_source_tree(&["x/1.cpp", "x/y/2.cpp", "x/y/z/3.cpp", "x/y/z/3.o"]);

    let first: HashSet<PathBuf> = discover(temp.path(), "*.cpp").unwrap().into_iter().collect();
    let second: HashSet<PathBuf> = discover(temp.path(), "*.cpp").unwrap().into_iter().collect();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn missing_root_fails_with_configuration_error() {
    let temp = create_source_tree(&[]);
    let missing = temp.path().join("src");

    let err = discover(&missing, "*.cpp").unwrap_err();

    assert!(matches!(err, ConfigurationError::MissingRoot { ref path } if *path == missing));
    assert!(err.to_string().contains(&missing.display().to_string()));
}
