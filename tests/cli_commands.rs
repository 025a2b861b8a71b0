mod common;

use std::process::Command;

use common::{create_source_tree, get_stasm_build_binary, write_config};

// ===== SOURCES / HEADERS =====

#[test]
fn sources_lists_cpp_files() {
    let temp = create_source_tree(&["src/a.cpp", "src/sub/b.cpp", "src/readme.md"]);
    let root = temp.path().join("src");

    let output = Command::new(get_stasm_build_binary())
        .args(["--no-config", "sources", "--root"])
        .arg(&root)
        .output()
        .expect("Failed to execute stasm-build sources");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "stdout: {stdout}");
    assert!(stdout.contains("a.cpp"));
    assert!(stdout.contains("b.cpp"));
    assert!(!stdout.contains("readme.md"));
}

#[test]
fn sources_with_custom_patterns() {
    let temp = create_source_tree(&["src/a.cpp", "src/b.cc", "src/c.h"]);

    let output = Command::new(get_stasm_build_binary())
        .args(["--no-config", "sources", "--pattern", "*.cc", "--pattern", "*.h", "--root"])
        .arg(temp.path().join("src"))
        .output()
        .expect("Failed to execute stasm-build sources --pattern");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2, "stdout: {stdout}");
    assert!(!stdout.contains("a.cpp"));
}

#[test]
fn sources_missing_root_exits_nonzero() {
    let temp = create_source_tree(&[]);
    let missing = temp.path().join("nowhere");

    let output = Command::new(get_stasm_build_binary())
        .args(["--no-config", "sources", "--root"])
        .arg(&missing)
        .output()
        .expect("Failed to execute stasm-build sources");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
    assert!(stderr.contains("nowhere"), "stderr: {stderr}");
}

#[test]
fn headers_lists_h_and_mh() {
    let temp = create_source_tree(&["src/stasm.h", "src/MOD_1/initasm.mh", "src/stasm.cpp"]);

    let output = Command::new(get_stasm_build_binary())
        .args(["--no-config", "headers", "--root"])
        .arg(temp.path().join("src"))
        .output()
        .expect("Failed to execute stasm-build headers");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2, "stdout: {stdout}");
    assert!(stdout.contains("initasm.mh"));
}

// ===== FLAGS =====

#[test]
fn flags_unix_strips_strict_prototypes() {
    let output = Command::new(get_stasm_build_binary())
        .args([
            "--no-config",
            "flags",
            "--toolchain",
            "unix",
            "--",
            "-Wstrict-prototypes",
            "-O2",
        ])
        .output()
        .expect("Failed to execute stasm-build flags");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "-O2");
}

#[test]
fn flags_msvc_appends_exception_flag() {
    let output = Command::new(get_stasm_build_binary())
        .args(["--no-config", "flags", "--toolchain", "msvc", "--", "/O2"])
        .output()
        .expect("Failed to execute stasm-build flags");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "/O2 /EHsc");
}

#[test]
fn flags_rejects_unknown_language() {
    let output = Command::new(get_stasm_build_binary())
        .args(["--no-config", "flags", "--language", "fortran", "--", "-O2"])
        .output()
        .expect("Failed to execute stasm-build flags");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fortran"), "stderr: {stderr}");
}

#[test]
fn flags_language_accepts_aliases() {
    let output = Command::new(get_stasm_build_binary())
        .args([
            "--no-config",
            "flags",
            "--toolchain",
            "unix",
            "--language",
            "cpp",
            "--",
            "-O2",
            "-Wstrict-prototypes",
        ])
        .output()
        .expect("Failed to execute stasm-build flags");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "-O2");
}

#[test]
fn flags_help_lists_languages() {
    let output = Command::new(get_stasm_build_binary())
        .args(["flags", "--help"])
        .output()
        .expect("Failed to execute stasm-build flags --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("possible values"), "stdout: {stdout}");
    assert!(stdout.contains("c++"), "stdout: {stdout}");
}

// ===== LIBRARIES =====

#[test]
fn libraries_on_windows_are_versioned() {
    let output = Command::new(get_stasm_build_binary())
        .args(["--no-config", "libraries", "--platform", "windows"])
        .output()
        .expect("Failed to execute stasm-build libraries");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        ["opencv_core300", "opencv_imgproc300", "opencv_objdetect300"]
    );
}

#[test]
fn libraries_on_linux_are_plain() {
    let output = Command::new(get_stasm_build_binary())
        .args(["--no-config", "libraries", "--platform", "linux", "A", "B"])
        .output()
        .expect("Failed to execute stasm-build libraries");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), ["A", "B"]);
}

// ===== PLAN / BUILD =====

#[test]
fn plan_json_for_windows() {
    let temp = create_source_tree(&["src/stasm.cpp", "src/MOD_1/facedet.cpp", "src/stasm.h"]);
    let config = write_config(temp.path(), &temp.path().join("src"), "");

    let output = Command::new(get_stasm_build_binary())
        .arg("--config")
        .arg(&config)
        .args(["plan", "--json", "--toolchain", "msvc", "--platform", "windows"])
        .output()
        .expect("Failed to execute stasm-build plan");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let plans: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let plan = plans.get(0).unwrap();
    assert_eq!(plan["name"], "stasm._stasm");
    assert_eq!(plan["toolchain"], "msvc");
    assert_eq!(plan["platform"], "windows");
    assert_eq!(plan["sources"].as_array().unwrap().len(), 2);
    assert_eq!(plan["depends"].as_array().unwrap().len(), 1);
    assert_eq!(plan["libraries"][0], "opencv_core300");
    assert!(
        plan["flags"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f == "/EHsc")
    );
}

#[test]
fn plan_fails_for_missing_source_root() {
    let temp = create_source_tree(&[]);
    let config = write_config(temp.path(), &temp.path().join("src"), "");

    let output = Command::new(get_stasm_build_binary())
        .arg("--config")
        .arg(&config)
        .arg("plan")
        .output()
        .expect("Failed to execute stasm-build plan");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to configure extension build"), "stderr: {stderr}");
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn build_dry_run_prints_commands() {
    let temp = create_source_tree(&["src/stasm.cpp", "src/sub/asm.cpp"]);
    let config = write_config(
        temp.path(),
        &temp.path().join("src"),
        "base_flags = [\"-O2\", \"-Wstrict-prototypes\"]",
    );

    let output = Command::new(get_stasm_build_binary())
        .arg("--config")
        .arg(&config)
        .args(["build", "--dry-run", "--toolchain", "unix", "--platform", "linux"])
        .env("CXX", "c++")
        .env_remove("CFLAGS")
        .env_remove("CXXFLAGS")
        .output()
        .expect("Failed to execute stasm-build build --dry-run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "stdout: {stdout}");
    assert!(lines.iter().take(2).all(|l| l.starts_with("c++ -c")));
    assert!(!stdout.contains("-Wstrict-prototypes"));
    assert!(stdout.contains("-lopencv_imgproc"));
    assert!(lines.last().unwrap().contains("-shared"));
}

#[test]
fn invalid_config_is_reported() {
    let temp = create_source_tree(&[]);
    let config = temp.path().join("broken.toml");
    std::fs::write(&config, "extension = 3").unwrap();

    let output = Command::new(get_stasm_build_binary())
        .arg("--config")
        .arg(&config)
        .arg("plan")
        .output()
        .expect("Failed to execute stasm-build plan");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"), "stderr: {stderr}");
}

#[test]
fn help_lists_subcommands() {
    let output = Command::new(get_stasm_build_binary())
        .arg("--help")
        .output()
        .expect("Failed to execute stasm-build --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["sources", "headers", "flags", "libraries", "plan", "build", "completion"] {
        assert!(stdout.contains(command), "missing {command} in help: {stdout}");
    }
}
