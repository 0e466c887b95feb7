//! Binary-level behaviour: argument handling, exit codes and operator output.

#![cfg(unix)]

mod common;

use assert_cmd::Command;
use common::{Project, failing_build, fake_build};
use predicates::prelude::*;

fn release() -> Command {
    let mut cmd = Command::cargo_bin("gokoban-release").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn unknown_os_is_a_usage_error() {
    let project = Project::new();
    release()
        .args(["macos", "1.0", "--project-root"])
        .arg(&project.root)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("macos"));

    assert!(!project.path("build-ran").exists());
}

#[test]
fn missing_version_is_a_usage_error() {
    release().arg("linux").assert().code(2);
}

#[test]
fn version_with_path_separator_is_rejected() {
    let project = Project::new();
    release()
        .args(["linux", "../1.0", "--project-root"])
        .arg(&project.root)
        .assert()
        .code(2);
}

#[test]
fn packages_a_release() {
    let project = Project::new();
    project.write_manifest(&fake_build());

    release()
        .args(["win", "1.4.2", "--project-root"])
        .arg(&project.root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"))
        .stdout(predicate::str::contains("gokoban-win-1.4.2.zip"))
        .stdout(predicate::str::contains("OpenAL32.dll"));

    assert!(project.path("gokoban-win-1.4.2.zip").is_file());
    assert!(!project.path("gokoban-win-1.4.2").exists());
}

#[test]
fn quiet_run_prints_nothing() {
    let project = Project::new();
    project.write_manifest(&fake_build());

    release()
        .args(["linux", "1.0", "--quiet", "--project-root"])
        .arg(&project.root)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(project.path("gokoban-linux-1.0.zip").is_file());
}

#[test]
fn explicit_config_path_is_used() {
    let project = Project::new();
    project.write_manifest(&fake_build());
    let manifest = project.path("release.toml");
    let moved = project.path("ci/release.toml");
    std::fs::create_dir_all(moved.parent().unwrap()).unwrap();
    std::fs::rename(&manifest, &moved).unwrap();

    release()
        .args(["linux", "1.0", "--project-root"])
        .arg(&project.root)
        .arg("--config")
        .arg(&moved)
        .assert()
        .success();

    assert!(project.path("build-ran").exists());
}

#[test]
fn existing_output_is_a_conflict() {
    let project = Project::new();
    project.write_manifest(&fake_build());
    common::write(&project.root, "gokoban-linux-1.0.zip", "old");

    release()
        .args(["linux", "1.0", "--project-root"])
        .arg(&project.root)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("preflight"))
        .stderr(predicate::str::contains("already exists"));

    assert!(!project.path("build-ran").exists());
}

#[test]
fn build_failure_exits_with_build_code() {
    let project = Project::new();
    project.write_manifest(&failing_build());

    release()
        .args(["linux", "1.0", "--project-root"])
        .arg(&project.root)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error: build stage failed"));

    assert!(!project.path("gokoban-linux-1.0").exists());
}

#[test]
fn missing_dependency_exits_with_io_code() {
    let project = Project::new();
    project.write_manifest(&fake_build());
    std::fs::remove_file(project.path("dist/win/libogg.dll")).unwrap();

    release()
        .args(["win-debug", "1.0", "--project-root"])
        .arg(&project.root)
        .assert()
        .code(5)
        .stderr(predicate::str::contains("dependency bundling stage failed"))
        .stderr(predicate::str::contains("libogg.dll"));
}

#[test]
fn invalid_manifest_is_a_usage_error() {
    let project = Project::new();
    common::write(&project.root, "release.toml", "[package]\nnmae = \"typo\"\n");

    release()
        .args(["linux", "1.0", "--project-root"])
        .arg(&project.root)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("release.toml"));

    assert!(!project.path("build-ran").exists());
}

#[test]
fn rejected_manifest_values_are_usage_errors() {
    for manifest in [
        "[package]\nname = \"\"\n",
        "[build]\nprogram = \"\"\n",
        "[[assets]]\nsource = \"img\"\ndest = \"../img\"\n",
    ] {
        let project = Project::new();
        common::write(&project.root, "release.toml", manifest);

        release()
            .args(["linux", "1.0", "--project-root"])
            .arg(&project.root)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("release.toml"));

        assert!(!project.path("build-ran").exists());
    }
}

#[test]
fn missing_project_root_is_a_usage_error() {
    let project = Project::new();
    release()
        .args(["linux", "1.0", "--project-root"])
        .arg(project.path("does-not-exist"))
        .assert()
        .code(2);
}
