// SPDX-License-Identifier: PMPL-1.0-or-later

//! Exit status and output files of the tscheck binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run the binary inside `dir` so no stray `.tscheck.yaml` is discovered.
fn tscheck(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tscheck"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run tscheck")
}

fn copy_fixture(dir: &Path, name: &str) -> String {
    fs::copy(fixture(name), dir.join(name)).unwrap();
    name.to_string()
}

#[test]
fn test_check_exit_status_follows_fail_on() {
    let dir = TempDir::new().unwrap();
    let hu = copy_fixture(dir.path(), "bitcoin_hu.ts");
    let tr = copy_fixture(dir.path(), "bitcoin_tr.ts");
    let fa = copy_fixture(dir.path(), "bitcoin_fa_IR.ts");

    assert!(tscheck(dir.path(), &["check", &hu]).status.success());

    // Critical placeholder finding.
    let out = tscheck(dir.path(), &["check", &tr]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("TS004"));

    // One medium accelerator finding sits below the default threshold.
    assert!(tscheck(dir.path(), &["check", &fa]).status.success());

    // Any failing file fails the run.
    assert_eq!(tscheck(dir.path(), &["check", &hu, &tr]).status.code(), Some(1));
}

#[test]
fn test_check_threshold_from_config() {
    let dir = TempDir::new().unwrap();
    let tr = copy_fixture(dir.path(), "bitcoin_tr.ts");
    let fa = copy_fixture(dir.path(), "bitcoin_fa_IR.ts");

    fs::write(dir.path().join("strict.yaml"), "fail_on: medium\n").unwrap();
    let out = tscheck(dir.path(), &["--config", "strict.yaml", "check", &fa]);
    assert_eq!(out.status.code(), Some(1));

    // Discovered from the working directory.
    fs::write(
        dir.path().join(".tscheck.yaml"),
        "disable: [placeholder-mismatch]\nfail_on: critical\n",
    )
    .unwrap();
    assert!(tscheck(dir.path(), &["check", &tr]).status.success());
}

#[test]
fn test_check_text_report_to_file_uses_extension() {
    let dir = TempDir::new().unwrap();
    let tr = copy_fixture(dir.path(), "bitcoin_tr.ts");

    let out = tscheck(dir.path(), &["check", &tr, "-o", "tr.sarif"]);
    assert_eq!(out.status.code(), Some(1));
    let sarif: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("tr.sarif")).unwrap()).unwrap();
    assert_eq!(sarif["version"], "2.1.0");

    tscheck(dir.path(), &["check", &tr, "-o", "tr.report"]);
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("tr.report")).unwrap()).unwrap();
    assert_eq!(json["language"], "tr");
}

#[test]
fn test_fmt_check_fails_on_non_canonical_file() {
    let dir = TempDir::new().unwrap();
    let hu = copy_fixture(dir.path(), "bitcoin_hu.ts");
    assert!(tscheck(dir.path(), &["fmt", "--check", &hu]).status.success());

    // lupdate closes contexts at column zero.
    let path = dir.path().join(&hu);
    let original = fs::read_to_string(&path).unwrap();
    let lupdate_style = original.replace("    </context>", "</context>");
    assert_ne!(lupdate_style, original);
    fs::write(&path, &lupdate_style).unwrap();

    let out = tscheck(dir.path(), &["fmt", "--check", &hu]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("not canonical"));
    assert_eq!(fs::read_to_string(&path).unwrap(), lupdate_style);

    assert!(tscheck(dir.path(), &["fmt", &hu]).status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert!(tscheck(dir.path(), &["fmt", "--check", &hu]).status.success());
}

#[test]
fn test_unparsable_catalog_is_an_error() {
    let dir = TempDir::new().unwrap();
    let broken = copy_fixture(dir.path(), "broken.ts");
    let out = tscheck(dir.path(), &["check", &broken]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("malformed XML"));
}
