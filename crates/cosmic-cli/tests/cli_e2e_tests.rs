//! End-to-end tests for the cosmic-esbuild binary

use assert_cmd::Command;
use cosmic_test_utils::TestProject;
use predicates::prelude::*;

fn cosmic(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("cosmic-esbuild").unwrap();
    cmd.current_dir(project.root())
        .env_remove("RUST_LOG")
        .env_remove("ESBUILD_BINARY_PATH");
    cmd
}

#[test]
fn help_lists_option_groups() {
    let project = TestProject::new();
    cosmic(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cosmic Options"))
        .stdout(predicate::str::contains("esbuild Basic Options"))
        .stdout(predicate::str::contains("esbuild Advanced Options"))
        .stdout(predicate::str::contains("[ENTRYPOINTS]..."));
}

#[test]
fn version_flag() {
    let project = TestProject::new();
    cosmic(&project)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_config_and_no_entrypoints_fails() {
    let project = TestProject::new();
    cosmic(&project)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No configuration file found."))
        .stderr(predicate::str::contains("No entrypoints have been defined."));
}

#[test]
fn broken_config_fails() {
    let project = TestProject::new();
    project.write("esbuild.config.toml", "entryPoints = [");

    cosmic(&project)
        .arg("src/index.ts")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error loading configuration:"));
}

#[test]
fn malformed_define_is_a_usage_error() {
    let project = TestProject::new();
    cosmic(&project)
        .args(["--define", "NOEQUALS", "src/index.ts"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--define"));
}

#[test]
fn missing_esbuild_binary_fails() {
    let project = TestProject::new();
    cosmic(&project)
        .env("ESBUILD_BINARY_PATH", project.root().join("no-such-esbuild"))
        .arg("src/index.ts")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to start"));
}

#[cfg(unix)]
mod with_fake_esbuild {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn fake_esbuild(project: &TestProject, exit_code: i32) -> PathBuf {
        let path = project.root().join("fake-esbuild");
        fs::write(
            &path,
            format!("#!/bin/sh\nprintf '%s\\n' \"$@\" > args.txt\nexit {exit_code}\n"),
        )
        .unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn successful_build() {
        let project = TestProject::new();
        project.write(
            "esbuild.config.json",
            r#"{"entryPoints": ["src/index.ts"], "outdir": "dist"}"#,
        );
        let esbuild = fake_esbuild(&project, 0);

        cosmic(&project)
            .env("ESBUILD_BINARY_PATH", &esbuild)
            .arg("--minify")
            .assert()
            .success()
            .stderr(predicate::str::contains("Found config at"))
            .stderr(predicate::str::contains("esbuild.config.json"))
            .stderr(predicate::str::contains("Build completed in"));

        let args = fs::read_to_string(project.root().join("args.txt")).unwrap();
        assert_eq!(args, "src/index.ts\n--minify\n--outdir=dist\n");
    }

    #[test]
    fn failed_build_exits_quietly() {
        let project = TestProject::new();
        let esbuild = fake_esbuild(&project, 1);

        cosmic(&project)
            .env("ESBUILD_BINARY_PATH", &esbuild)
            .arg("src/index.ts")
            .assert()
            .success()
            .stderr(predicate::str::contains("Build completed").not());
    }

    #[test]
    fn deprecated_config_location_warns() {
        let project = TestProject::new();
        project.write(".esbuildrc.yaml", "entryPoints:\n  - src/index.ts\n");
        let esbuild = fake_esbuild(&project, 0);

        cosmic(&project)
            .env("ESBUILD_BINARY_PATH", &esbuild)
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Hidden configuration files like .esbuildrc.yaml are deprecated",
            ));
    }

    #[test]
    fn explicit_nested_runcom_does_not_warn() {
        let project = TestProject::new();
        project.write("sub/.esbuildrc.json", r#"{"entryPoints": ["src/index.ts"]}"#);
        let esbuild = fake_esbuild(&project, 0);

        cosmic(&project)
            .env("ESBUILD_BINARY_PATH", &esbuild)
            .args(["-c", "sub/.esbuildrc.json"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Found config at"))
            .stderr(predicate::str::contains("Hidden configuration files").not());
    }

    #[test]
    fn debug_flag_logs_final_options() {
        let project = TestProject::new();
        let esbuild = fake_esbuild(&project, 0);

        cosmic(&project)
            .env("ESBUILD_BINARY_PATH", &esbuild)
            .args(["--debug", "src/index.ts"])
            .assert()
            .success()
            .stderr(predicate::str::contains("esbuild Options"));
    }
}
