//! End-to-end CLI tests against the project files in `tests/fixtures/`.
//!
//! Commands run with the fixture directory as the working directory, so paths in the output
//! are the short relative names and need no normalization.

use assert_cmd::Command;
use extproj_test_util::{legacy_project_xml, write_file};
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a Command for the extproj binary.
/// Wraps the deprecated cargo_bin to centralize the deprecation warning.
#[allow(deprecated)]
fn extproj_cmd() -> Command {
    Command::cargo_bin("extproj").expect("extproj binary not found - run `cargo build` first")
}

/// Get the path to the test fixtures directory
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("extproj-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

fn in_fixture(name: &str) -> Command {
    let mut cmd = extproj_cmd();
    cmd.current_dir(fixtures_dir().join(name));
    cmd.env_remove("EXTPROJ_LOG");
    cmd
}

fn read_json(path: PathBuf) -> Value {
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
    serde_json::from_str(&text).expect("fixture json")
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn describe_legacy_text() {
    in_fixture("legacy_vs2008")
        .args(["describe", "foo.vcproj"])
        .assert()
        .success()
        .stdout("source:  foo.vcproj\nversion: 2008\nname:    Foo\nguid:    {ABC}\n");
}

#[test]
fn describe_matches_expected_json() {
    for (fixture, file) in [
        ("legacy_vs2008", "foo.vcproj"),
        ("modern_vs2010", "bar.vcxproj"),
    ] {
        let output = in_fixture(fixture)
            .args(["--format", "json", "describe", file])
            .output()
            .expect("run extproj");
        assert!(output.status.success(), "{fixture}: {output:?}");
        let expected = read_json(fixtures_dir().join(fixture).join("expected.describe.json"));
        assert_eq!(stdout_json(&output), expected, "{fixture}");
    }
}

#[test]
fn describe_unknown_version_renders_diagnostic() {
    in_fixture("broken_version")
        .args(["describe", "broken.vcproj"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(
            "error: unrecognized version of Visual Studio project broken.vcproj: Version=\"6.00\"\n    \
             at broken.vcproj:2:1\n    \
             at file=broken.vcproj\n",
        );
}

#[test]
fn describe_unknown_version_as_json() {
    let output = in_fixture("broken_version")
        .args(["describe", "broken.vcproj", "--format", "json"])
        .output()
        .expect("run extproj");
    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report["code"], "unrecognized_schema_version");
    assert_eq!(
        report["context"],
        serde_json::json!(["at broken.vcproj:2:1", "at file=broken.vcproj"])
    );
}

#[test]
fn describe_malformed_document_is_located() {
    in_fixture("malformed")
        .args(["describe", "bad.vcxproj"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("bad.vcxproj:4:"))
        .stderr(predicate::str::contains("    at file=bad.vcxproj"));
}

#[test]
fn describe_unrecognized_extension() {
    in_fixture("mixed")
        .args(["describe", "notes.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "error: no external build handler recognizes notes.txt",
        ))
        .stderr(predicate::str::contains("    at file=notes.txt"));
}

#[test]
fn describe_missing_file_is_io_error() {
    in_fixture("legacy_vs2008")
        .args(["--format", "json", "describe", "missing.vcproj"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"code\": \"io_error\""));
}

#[test]
fn subgraph_is_not_implemented() {
    in_fixture("modern_vs2010")
        .args(["subgraph", "bar.vcxproj"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: "))
        .stderr(predicate::str::contains("not implemented"))
        .stderr(predicate::str::contains("    at file=bar.vcxproj"));
}

#[test]
fn scan_mixed_tree_reports_failures_with_exit_code_2() {
    let expected = std::fs::read_to_string(fixtures_dir().join("mixed").join("expected.scan.txt"))
        .expect("expected scan output");
    in_fixture("mixed")
        .args(["scan", "."])
        .assert()
        .code(2)
        .stdout(predicate::str::diff(expected))
        .stderr(predicate::str::contains("./broken/broken.vcproj"))
        .stderr(predicate::str::contains("1 of 4 project files"))
        .stderr(predicate::str::contains("zlib").not());
}

#[test]
fn scan_json_written_to_file() {
    let tmp = TempDir::new().expect("temp dir");
    let out = tmp.path().join("reports").join("scan.json");
    in_fixture("mixed")
        .args(["scan", ".", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .code(2);

    let report = read_json(out);
    assert_eq!(report["failed"], 1);
    let files = report["files"].as_array().expect("files array");
    assert_eq!(files.len(), 4);
    assert_eq!(files[0]["descriptor"]["version"], 2010);
    assert_eq!(files[1]["diagnostic"]["code"], "unrecognized_schema_version");
}

#[test]
fn scan_clean_tree_succeeds() {
    let tmp = TempDir::new().expect("temp dir");
    write_file(
        &tmp.path().join("one").join("one.vcproj"),
        &legacy_project_xml(Some("8.00"), Some("One"), None),
    );
    extproj_cmd()
        .current_dir(tmp.path())
        .args(["scan", "."])
        .assert()
        .success()
        .stdout("./one/one.vcproj: 2005 One -\n");
}

#[test]
fn handlers_lists_visual_studio() {
    in_fixture("legacy_vs2008")
        .arg("handlers")
        .assert()
        .success()
        .stdout("visual-studio: vcproj, vcxproj\n");
}

#[test]
fn disabled_handler_via_config() {
    let tmp = TempDir::new().expect("temp dir");
    let config = tmp.path().join("extproj.toml");
    write_file(&config, "[handlers.visual-studio]\nenabled = false\n");
    write_file(
        &tmp.path().join("foo.vcproj"),
        &legacy_project_xml(Some("9.00"), Some("Foo"), None),
    );

    extproj_cmd()
        .current_dir(tmp.path())
        .arg("handlers")
        .assert()
        .success()
        .stdout("");
    extproj_cmd()
        .current_dir(tmp.path())
        .args(["describe", "foo.vcproj"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no external build handler recognizes"));
}

#[test]
fn invalid_config_is_a_runtime_error() {
    let tmp = TempDir::new().expect("temp dir");
    write_file(&tmp.path().join("extproj.toml"), "format = \"yaml\"\n");
    extproj_cmd()
        .current_dir(tmp.path())
        .arg("handlers")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("extproj error: resolve config"))
        .stderr(predicate::str::contains("yaml"));
}

#[test]
fn invalid_override_names_the_value() {
    in_fixture("legacy_vs2008")
        .args(["--on-collision", "last-wins", "handlers"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("last-wins"));
}

#[test]
fn schema_prints_config_json_schema() {
    let output = extproj_cmd().arg("schema").output().expect("run extproj");
    assert!(output.status.success());
    let schema = stdout_json(&output);
    assert!(schema["properties"]["on_collision"].is_object());
    assert!(schema["properties"]["scan"].is_object());
}
