//! Command-line host tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = TempDir::new().expect("create project dir");
    fs::create_dir_all(dir.path().join("src/assets/scss/nested")).expect("create assets");
    fs::write(dir.path().join("src/assets/asset-1.js"), b"1").expect("write asset-1");
    fs::write(dir.path().join("src/assets/scss/scss-1.scss"), b"$a: 1;").expect("write scss-1");
    fs::write(dir.path().join("src/assets/scss/nested/scss-3.scss"), b"$c: 3;")
        .expect("write scss-3");
    dir
}

fn bundle_copy(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bundle-copy").expect("binary is built");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").env_remove("BUNDLE_COPY_LOG");
    cmd
}

#[test]
fn test_list_targets_default_to_dist() {
    let dir = project();

    bundle_copy(&dir)
        .args(["src/assets/asset-1.js", "src/assets/scss"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("dist/asset-1.js").exists());
    assert!(dir.path().join("dist/scss/nested/scss-3.scss").exists());
}

#[test]
fn test_output_file_sets_base_dir() {
    let dir = project();

    bundle_copy(&dir)
        .args(["--output-file", "public/js/app.js", "src/assets/asset-1.js"])
        .assert()
        .success();

    assert!(dir.path().join("public/js/asset-1.js").exists());
}

#[test]
fn test_verbose_listing() {
    let dir = project();

    bundle_copy(&dir)
        .args(["--verbose", "--map", "src/assets/scss=dist/nested/folder"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied files and folders:"))
        .stdout(predicate::str::contains(
            "src/assets/scss -> dist/nested/folder",
        ));

    assert!(dir
        .path()
        .join("dist/nested/folder/nested/scss-3.scss")
        .exists());
}

#[test]
fn test_config_file_with_output_folder_override() {
    let dir = project();
    fs::write(
        dir.path().join("copy.json"),
        r#"{"targets": ["src/assets/asset-1.js"], "outputFolder": "ignored"}"#,
    )
    .expect("write config");

    bundle_copy(&dir)
        .args(["--config", "copy.json", "--output-folder", "dist/assets"])
        .assert()
        .success();

    assert!(dir.path().join("dist/assets/asset-1.js").exists());
    assert!(!dir.path().join("ignored").exists());
}

#[test]
fn test_missing_source_fails_with_enoent() {
    let dir = project();

    bundle_copy(&dir)
        .arg("src/assets/asset-3.js")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "ENOENT: no such file or directory, stat 'src/assets/asset-3.js'",
        ));
}

#[test]
fn test_targets_and_map_conflict() {
    let dir = project();

    bundle_copy(&dir)
        .args(["src/assets/asset-1.js", "--map", "a=b"])
        .assert()
        .failure();

    assert!(!dir.path().join("dist").exists());
}
