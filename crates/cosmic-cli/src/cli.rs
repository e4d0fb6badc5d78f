//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use cosmic_bundler::{Format, Packages};

const COSMIC: &str = "Cosmic Options";
const BASIC: &str = "esbuild Basic Options";
const ADVANCED: &str = "esbuild Advanced Options";

/// Build with esbuild using options from a configuration file
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "cosmic-esbuild")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", help_heading = COSMIC)]
    pub config: Option<PathBuf>,

    /// Run in watch mode
    #[arg(short, long, help_heading = COSMIC)]
    pub watch: bool,

    /// Clean output directory before building
    #[arg(long, help_heading = COSMIC)]
    pub clean: bool,

    /// Enable debug output
    #[arg(long, help_heading = COSMIC)]
    pub debug: bool,

    /// Bundle all dependencies into the output files
    #[arg(long, help_heading = BASIC)]
    pub bundle: bool,

    /// Substitute K with V while parsing
    #[arg(long, value_name = "K=V", value_parser = parse_key_value, help_heading = BASIC)]
    pub define: Vec<(String, String)>,

    /// Exclude module M from the bundle
    #[arg(long, value_name = "MODULE", value_delimiter = ',', help_heading = BASIC)]
    pub external: Vec<String>,

    /// Output format
    #[arg(long, value_name = "iife|cjs|esm", help_heading = BASIC)]
    pub format: Option<Format>,

    /// Use loader L to load file extension X
    #[arg(long, value_name = "X=L", value_parser = parse_key_value, help_heading = BASIC)]
    pub loader: Vec<(String, String)>,

    /// Minify the output
    #[arg(long, help_heading = BASIC)]
    pub minify: bool,

    /// The output directory (for multiple entry points)
    #[arg(long, value_name = "DIR", conflicts_with = "outfile", help_heading = BASIC)]
    pub outdir: Option<PathBuf>,

    /// The output file (for one entry point)
    #[arg(long, value_name = "FILE", help_heading = BASIC)]
    pub outfile: Option<PathBuf>,

    /// Set to "external" to avoid bundling any package
    #[arg(long, value_name = "bundle|external", help_heading = BASIC)]
    pub packages: Option<Packages>,

    /// Emit a source map
    #[arg(long, help_heading = BASIC)]
    pub sourcemap: bool,

    /// Enable code splitting
    #[arg(long, help_heading = BASIC)]
    pub splitting: bool,

    /// Environment target
    #[arg(long, value_name = "TARGET", value_delimiter = ',', help_heading = BASIC)]
    pub target: Vec<String>,

    /// Allow output files to overwrite input files
    #[arg(long, help_heading = ADVANCED)]
    pub allow_overwrite: bool,

    /// Entry point files, replacing those in the configuration file
    #[arg(value_name = "ENTRYPOINTS")]
    pub entrypoints: Vec<String>,
}

/// Parse a `KEY=VALUE` pair, splitting on the first `=`.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        Some(_) => Err(format!("missing key in `{s}`")),
        None => Err(format!("expected KEY=VALUE, no `=` found in `{s}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["cosmic-esbuild"]);
        assert_eq!(cli, Cli::default());
    }

    #[test]
    fn parse_cosmic_options() {
        let cli = Cli::parse_from(["cosmic-esbuild", "-c", "build.json", "-w", "--clean", "--debug"]);
        assert_eq!(cli.config, Some(PathBuf::from("build.json")));
        assert!(cli.watch);
        assert!(cli.clean);
        assert!(cli.debug);
    }

    #[test]
    fn parse_entrypoints() {
        let cli = Cli::parse_from(["cosmic-esbuild", "--bundle", "src/a.ts", "src/b.ts"]);
        assert!(cli.bundle);
        assert_eq!(cli.entrypoints, vec!["src/a.ts", "src/b.ts"]);
    }

    #[test]
    fn parse_key_value_flags() {
        let cli = Cli::parse_from([
            "cosmic-esbuild",
            "--define",
            "DEBUG=false",
            "--define",
            "URL=http://x?a=b",
            "--loader",
            ".svg=text",
        ]);
        assert_eq!(
            cli.define,
            vec![
                ("DEBUG".to_string(), "false".to_string()),
                ("URL".to_string(), "http://x?a=b".to_string()),
            ]
        );
        assert_eq!(cli.loader, vec![(".svg".to_string(), "text".to_string())]);
    }

    #[test]
    fn parse_list_flags() {
        let cli = Cli::parse_from([
            "cosmic-esbuild",
            "--external",
            "react,react-dom",
            "--external",
            "fsevents",
            "--target=es2020,node18",
            "src/index.ts",
        ]);
        assert_eq!(cli.external, vec!["react", "react-dom", "fsevents"]);
        assert_eq!(cli.target, vec!["es2020", "node18"]);
        assert_eq!(cli.entrypoints, vec!["src/index.ts"]);
    }

    #[test]
    fn parse_typed_values() {
        let cli = Cli::parse_from(["cosmic-esbuild", "--format", "esm", "--packages", "external"]);
        assert_eq!(cli.format, Some(Format::Esm));
        assert_eq!(cli.packages, Some(Packages::External));
    }

    #[rstest]
    #[case::unknown_format(&["--format", "amd"])]
    #[case::unknown_packages(&["--packages", "none"])]
    #[case::define_without_equals(&["--define", "NOEQUALS"])]
    #[case::define_without_key(&["--define", "=value"])]
    #[case::loader_without_equals(&["--loader", "svg"])]
    #[case::outdir_and_outfile(&["--outdir", "dist", "--outfile", "out.js"])]
    fn invalid_values_are_rejected(#[case] args: &[&str]) {
        let argv = std::iter::once("cosmic-esbuild").chain(args.iter().copied());
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn help_groups_options() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains(COSMIC));
        assert!(help.contains(BASIC));
        assert!(help.contains(ADVANCED));
    }

    #[test]
    fn key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert_eq!(parse_key_value("a="), Ok(("a".to_string(), String::new())));
    }
}
