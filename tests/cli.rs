#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vfolder_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("vfolder"));
    cmd.env("VFOLDER_HOME", home.path().as_os_str())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_glossary_workflow() {
    let home = TempDir::new().unwrap();

    vfolder_cmd(&home)
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    vfolder_cmd(&home)
        .args(["folder", "create", "glossary", "--rules", "glossary/*.po"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created virtual folder glossary"));

    // The finder picks up new stores without an explicit sync
    vfolder_cmd(&home)
        .args([
            "store",
            "add",
            "/en/myproj/glossary/terms.po",
            "/en/myproj/docs/terms.po",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("/en/myproj/glossary/terms.po joined glossary"));

    vfolder_cmd(&home)
        .args(["store", "list", "--folder", "glossary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/en/myproj/glossary/terms.po"))
        .stdout(predicate::str::contains("/en/myproj/docs/terms.po").not());

    vfolder_cmd(&home)
        .args(["sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glossary: up to date"));

    vfolder_cmd(&home)
        .args(["tree", "glossary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/en/myproj/glossary/glossary/"));
}

#[test]
fn test_find_is_a_dry_run() {
    let home = TempDir::new().unwrap();

    vfolder_cmd(&home)
        .args(["folder", "create", "docs", "--rules", "docs/*", "-l", "fr"])
        .assert()
        .success();

    vfolder_cmd(&home)
        .args(["find", "/fr/proj/docs/guide.po"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docs"));

    vfolder_cmd(&home)
        .args(["find", "/de/proj/docs/guide.po"])
        .assert()
        .success()
        .stdout(predicate::str::contains("matches no virtual folder"));

    // Nothing was registered by the lookups
    vfolder_cmd(&home)
        .args(["store", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No stores found."));
}

#[test]
fn test_editing_rules_releases_stores() {
    let home = TempDir::new().unwrap();

    vfolder_cmd(&home)
        .args(["store", "add", "/en/p/a.po", "/en/p/b.pot"])
        .assert()
        .success();

    vfolder_cmd(&home)
        .args(["folder", "create", "templates", "--rules", "*.po, *.pot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("templates: 2 added, 0 removed"));

    vfolder_cmd(&home)
        .args(["folder", "edit", "templates", "--rules", "*.pot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("templates: 0 added, 1 removed"));

    vfolder_cmd(&home)
        .args(["match", "templates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 matching store(s), 0 to add, 0 to remove"));
}

#[test]
fn test_config_default_priority_applies_to_new_folders() {
    let home = TempDir::new().unwrap();

    vfolder_cmd(&home)
        .args(["config", "default-priority", "2.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default-priority set to 2.5"));

    vfolder_cmd(&home)
        .args(["folder", "create", "all", "--rules", "*"])
        .assert()
        .success();

    vfolder_cmd(&home)
        .args(["store", "add", "/en/p/a.po"])
        .assert()
        .success();

    vfolder_cmd(&home)
        .args(["store", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.50"))
        .stdout(predicate::str::contains("/en/p/a.po"));
}

#[test]
fn test_errors_exit_nonzero() {
    let home = TempDir::new().unwrap();

    vfolder_cmd(&home)
        .args(["folder", "show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Virtual folder not found: missing"));

    vfolder_cmd(&home)
        .args(["folder", "create", "a/b", "--rules", "*"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot contain '/'"));

    vfolder_cmd(&home)
        .args(["store", "add", "/en/only-a-file.po"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pootle path"));
}

#[test]
fn test_corrupt_config_falls_back_with_warning() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.json"), "{ not json").unwrap();

    vfolder_cmd(&home)
        .args(["folder", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No virtual folders."))
        .stderr(predicate::str::contains("unreadable config.json, using defaults"));
}
