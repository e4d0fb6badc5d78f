//! Layered build options: defaults, then the config file, then CLI flags

use std::path::Path;

use cosmic_bundler::{BuildOptions, EntryPoints, Sourcemap, Target};
use serde_json::Value;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Merge the parsed config file and the CLI flags into final build options.
///
/// CLI flags win. Boolean flags only ever switch an option on; an absent
/// flag leaves the config value untouched. `define` and `loader` merge per
/// key, list flags replace the config list. When neither `outdir` nor
/// `outfile` ends up set, `outdir` defaults to `cwd`.
pub fn merge_options(config: Option<&Value>, cli: &Cli, cwd: &Path) -> Result<BuildOptions> {
    let mut options = match config {
        Some(value) => {
            serde_json::from_value(value.clone()).map_err(CliError::InvalidOptions)?
        }
        None => BuildOptions::default(),
    };

    if !cli.entrypoints.is_empty() {
        options.entry_points = Some(EntryPoints::from_paths(&cli.entrypoints));
    }

    // Basic options
    if cli.bundle {
        options.bundle = Some(true);
    }
    if !cli.define.is_empty() {
        options
            .define
            .get_or_insert_default()
            .extend(cli.define.iter().cloned());
    }
    if !cli.external.is_empty() {
        options.external = Some(cli.external.clone());
    }
    if let Some(format) = cli.format {
        options.format = Some(format);
    }
    if !cli.loader.is_empty() {
        let loader = options.loader.get_or_insert_default();
        for (ext, name) in &cli.loader {
            let ext = if ext.starts_with('.') {
                ext.clone()
            } else {
                format!(".{ext}")
            };
            loader.insert(ext, name.clone());
        }
    }
    if cli.minify {
        options.minify = Some(true);
    }
    if let Some(outdir) = &cli.outdir {
        options.outdir = Some(outdir.clone());
        options.outfile = None;
    }
    if let Some(outfile) = &cli.outfile {
        options.outfile = Some(outfile.clone());
        options.outdir = None;
    }
    if let Some(packages) = cli.packages {
        options.packages = Some(packages);
    }
    if cli.sourcemap {
        options.sourcemap = Some(Sourcemap::Enabled(true));
    }
    if cli.splitting {
        options.splitting = Some(true);
    }
    if !cli.target.is_empty() {
        options.target = Some(Target(cli.target.clone()));
    }

    // Advanced options
    if cli.allow_overwrite {
        options.allow_overwrite = Some(true);
    }

    if options.outdir.is_none() && options.outfile.is_none() {
        options.outdir = Some(cwd.to_path_buf());
    }

    Ok(options)
}
