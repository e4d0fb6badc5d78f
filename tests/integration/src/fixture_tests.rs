//! Fixture project tests
//!
//! Each project under `test-fixtures/projects` keeps its esbuild config in a
//! different location and format. These tests run discovery, merge and the
//! build lifecycle against copies of them. The `js` project needs `node`
//! and is skipped without it.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use cosmic_bundler::{
    EntryPoints, Format, Packages, Platform, Sourcemap, SourcemapKind, Target,
};
use cosmic_cli::{Cli, CosmicEsbuild, merge_options};
use cosmic_config::{Deprecation, Explorer, MODULE_NAME};
use cosmic_test_utils::{RecordingBundler, node_available};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

fn fixture(name: &str) -> TempDir {
    let source = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/projects")
        .join(name);
    let temp = TempDir::new().unwrap();
    copy_dir(&source, temp.path());
    temp
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("cosmic-esbuild").chain(args.iter().copied()))
}

#[rstest]
#[case("json", "esbuild.config.json")]
#[case("jsonc", "esbuild.config.jsonc")]
#[case("json5", ".esbuildrc.json5")]
#[case("cson", "esbuild.config.cson")]
#[case("package-json", "package.json")]
#[case("rc-yaml", ".esbuildrc")]
#[case("dotconfig-toml", ".config/esbuildrc.toml")]
fn discovers_config(#[case] name: &str, #[case] expected: &str) {
    let project = fixture(name);

    let result = Explorer::new(MODULE_NAME)
        .search(project.path())
        .unwrap()
        .expect("fixture has a config");

    assert_eq!(result.filepath, project.path().join(expected));
    assert!(!result.is_empty);
}

#[rstest]
#[case("json", false)]
#[case("jsonc", false)]
#[case("json5", true)]
#[case("cson", false)]
#[case("package-json", true)]
#[case("rc-yaml", true)]
#[case("dotconfig-toml", false)]
fn deprecated_locations(#[case] name: &str, #[case] deprecated: bool) {
    let project = fixture(name);
    let result = Explorer::new(MODULE_NAME)
        .search(project.path())
        .unwrap()
        .unwrap();

    assert_eq!(
        Deprecation::detect(&result.filepath, project.path(), MODULE_NAME).is_some(),
        deprecated
    );
}

fn merged(name: &str, args: &[&str]) -> (TempDir, cosmic_bundler::BuildOptions) {
    let project = fixture(name);
    let config = Explorer::new(MODULE_NAME)
        .search(project.path())
        .unwrap()
        .and_then(|r| r.config);
    let options = merge_options(config.as_ref(), &cli(args), project.path()).unwrap();
    (project, options)
}

#[test]
fn json_project_options() {
    let (_project, options) = merged("json", &[]);
    assert_eq!(options.bundle, Some(true));
    assert_eq!(options.format, Some(Format::Esm));
    assert_eq!(options.outdir, Some(PathBuf::from("dist")));
    assert_eq!(options.sourcemap, Some(Sourcemap::Kind(SourcemapKind::Linked)));
    assert_eq!(options.define.unwrap()["DEBUG"], "false");
}

#[test]
fn jsonc_project_options() {
    let (_project, options) = merged("jsonc", &[]);
    assert_eq!(options.platform, Some(Platform::Node));
    assert_eq!(options.packages, Some(Packages::External));
    assert_eq!(options.outfile, Some(PathBuf::from("dist/index.js")));
    assert_eq!(options.outdir, None);
}

#[test]
fn json5_project_options() {
    let (_project, options) = merged("json5", &[]);
    assert_eq!(options.minify, Some(true));
    assert_eq!(options.target, Some(Target(vec!["es2020".into()])));
    assert_eq!(options.outdir, Some(PathBuf::from("build")));
}

#[test]
fn cson_project_options() {
    let (_project, options) = merged("cson", &[]);
    assert_eq!(options.bundle, Some(true));
    assert_eq!(options.platform, Some(Platform::Browser));
    assert_eq!(options.outdir, Some(PathBuf::from("public/js")));
    assert_eq!(options.loader.unwrap()[".svg"], "text");
}

#[test]
fn package_json_project_options() {
    let (_project, options) = merged("package-json", &[]);
    assert_eq!(options.format, Some(Format::Cjs));
    assert!(options.extra.is_empty());
}

#[test]
fn rc_yaml_project_options() {
    let (_project, options) = merged("rc-yaml", &[]);
    assert_eq!(
        options.external,
        Some(vec!["react".to_string(), "react-dom".to_string()])
    );
    assert_eq!(options.splitting, Some(true));
    assert_eq!(options.format, Some(Format::Esm));
}

#[test]
fn dotconfig_toml_project_options() {
    let (_project, options) = merged("dotconfig-toml", &[]);
    assert_eq!(
        options.target,
        Some(Target(vec!["node18".into(), "es2022".into()]))
    );
    assert_eq!(options.loader.unwrap()[".png"], "file");
    assert_eq!(options.outdir, Some(PathBuf::from("out")));
}

#[test]
fn cli_overrides_fixture_config() {
    let (_project, options) = merged(
        "rc-yaml",
        &["--format", "cjs", "--external", "vue", "--outfile", "app.js", "src/app.ts"],
    );
    assert_eq!(options.entry_points, Some(EntryPoints::from_paths(["src/app.ts"])));
    assert_eq!(options.format, Some(Format::Cjs));
    assert_eq!(options.external, Some(vec!["vue".to_string()]));
    assert_eq!(options.outfile, Some(PathBuf::from("app.js")));
    assert_eq!(options.outdir, None);
    assert_eq!(options.splitting, Some(true));
}

#[rstest]
#[case("json")]
#[case("jsonc")]
#[case("json5")]
#[case("cson")]
#[case("package-json")]
#[case("rc-yaml")]
#[case("dotconfig-toml")]
#[tokio::test]
async fn every_fixture_builds(#[case] name: &str) {
    let project = fixture(name);
    let bundler = RecordingBundler::new();

    CosmicEsbuild::new(cli(&[]), project.path(), bundler.clone())
        .run()
        .await
        .unwrap();

    let builds = bundler.builds();
    assert_eq!(builds.len(), 1);
    assert_eq!(
        builds[0].entry_points,
        Some(EntryPoints::from_paths(["src/index.ts"]))
    );
}

#[tokio::test]
async fn js_module_fixture() {
    if !node_available() {
        eprintln!("node is not on PATH, skipping");
        return;
    }
    let project = fixture("js");

    let result = Explorer::new(MODULE_NAME)
        .search(project.path())
        .unwrap()
        .expect("fixture has a config");
    assert_eq!(result.filepath, project.path().join("esbuild.config.js"));
    assert_eq!(
        Deprecation::detect(&result.filepath, project.path(), MODULE_NAME),
        None
    );

    let options = merge_options(result.config.as_ref(), &cli(&[]), project.path()).unwrap();
    assert_eq!(options.bundle, Some(true));
    assert_eq!(options.outdir, Some(PathBuf::from("dist")));
    assert_eq!(options.sourcemap, Some(Sourcemap::Kind(SourcemapKind::External)));
    assert_eq!(options.define.unwrap()["DEBUG"], "false");

    let bundler = RecordingBundler::new();
    CosmicEsbuild::new(cli(&["--minify"]), project.path(), bundler.clone())
        .run()
        .await
        .unwrap();

    let builds = bundler.builds();
    assert_eq!(builds.len(), 1);
    assert_eq!(
        builds[0].entry_points,
        Some(EntryPoints::from_paths(["src/index.ts"]))
    );
    assert_eq!(builds[0].minify, Some(true));
}

#[tokio::test]
async fn clean_build_of_fixture() {
    let project = fixture("json");
    fs::create_dir_all(project.path().join("dist")).unwrap();
    fs::write(project.path().join("dist/old.js"), "").unwrap();

    CosmicEsbuild::new(cli(&["--clean"]), project.path(), RecordingBundler::new())
        .run()
        .await
        .unwrap();

    assert!(!project.path().join("dist").exists());
    assert!(project.path().join("src/index.ts").exists());
}
