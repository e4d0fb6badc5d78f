//! The build lifecycle around the bundler
//!
//! [`CosmicEsbuild`] loads the config, merges it with the CLI flags and runs
//! either a one-shot build or watch mode, cleaning and timing around it.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use colored::Colorize;
use cosmic_bundler::{BuildOptions, Bundler, WatchHooks, WatchOptions};
use cosmic_config::{Deprecation, Explorer, MODULE_NAME};
use serde_json::Value;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::merge::merge_options;

/// One cosmic-esbuild invocation.
pub struct CosmicEsbuild<B> {
    cli: Cli,
    cwd: PathBuf,
    explorer: Explorer,
    bundler: B,
    options: BuildOptions,
}

impl<B: Bundler> CosmicEsbuild<B> {
    pub fn new(cli: Cli, cwd: impl Into<PathBuf>, bundler: B) -> Self {
        Self {
            cli,
            cwd: cwd.into(),
            explorer: Explorer::new(MODULE_NAME),
            bundler,
            options: BuildOptions::default(),
        }
    }

    /// Use a custom config explorer instead of the default one.
    pub fn with_explorer(mut self, explorer: Explorer) -> Self {
        self.explorer = explorer;
        self
    }

    /// Final build options, populated by [`Self::run`].
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn bundler(&self) -> &B {
        &self.bundler
    }

    /// Load and merge the configuration, then build or watch.
    pub async fn run(&mut self) -> Result<()> {
        tracing::debug!(options = ?self.cli, "CLI Options");
        tracing::debug!(entrypoints = ?self.cli.entrypoints, "CLI Entrypoints");

        let config = self.load_config()?;
        let options = merge_options(config.as_ref(), &self.cli, &self.cwd)?;
        if !options.has_entry_points() {
            return Err(CliError::NoEntryPoints);
        }

        tracing::debug!(?options, "esbuild Options");
        self.options = options;

        if self.cli.watch {
            self.watch().await
        } else {
            self.build().await.map(|_| ())
        }
    }

    /// Find or load the config file and report what was found.
    ///
    /// Returns `None` when there is no config file or it is empty.
    pub fn load_config(&self) -> Result<Option<Value>> {
        let result = match &self.cli.config {
            Some(path) => Some(self.explorer.load(&self.cwd.join(path))?),
            None => self.explorer.search(&self.cwd)?,
        };

        let Some(result) = result else {
            tracing::warn!("No configuration file found.");
            return Ok(None);
        };

        if let Some(deprecation) =
            Deprecation::detect(&result.filepath, &self.cwd, self.explorer.module_name())
        {
            tracing::warn!("{deprecation}");
        }

        if result.is_empty {
            tracing::warn!("Configuration file is empty.");
            return Ok(None);
        }

        let relative = result
            .filepath
            .strip_prefix(&self.cwd)
            .unwrap_or(&result.filepath);
        tracing::info!(
            "Found config at {}",
            relative.display().to_string().blue()
        );

        Ok(result.config)
    }

    /// Run a single build.
    ///
    /// A failure the bundler already reported returns `Ok(None)` without a
    /// success message. Otherwise returns the build duration.
    pub async fn build(&self) -> Result<Option<Duration>> {
        println!();

        if let Some(dir) = self.clean_target() {
            clean_dir(&dir).await?;
        }

        let start = Instant::now();
        match self.bundler.build(&self.options).await {
            Ok(_) => {}
            Err(cosmic_bundler::Error::BuildFailed { code }) => {
                tracing::debug!(?code, "Build failed");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }
        let elapsed = start.elapsed();

        tracing::info!("Build completed in {:.3}s", elapsed.as_secs_f64());
        Ok(Some(elapsed))
    }

    /// Build, then rebuild on change until the bundler stops.
    pub async fn watch(&self) -> Result<()> {
        println!();

        let hooks = Arc::new(LifecycleHooks {
            clean: self.clean_target(),
        });
        let mut handle = self.bundler.context(&self.options, hooks).await?;

        match handle.watch(WatchOptions::default()).await {
            Ok(()) => Ok(()),
            Err(cosmic_bundler::Error::BuildFailed { code }) => {
                tracing::debug!(?code, "Watcher exited");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The directory `--clean` should remove, if any.
    fn clean_target(&self) -> Option<PathBuf> {
        if !self.cli.clean {
            return None;
        }
        let outdir = self.options.outdir.as_ref()?;
        let target = normalize(&self.cwd.join(outdir));

        if normalize(&self.cwd).starts_with(&target) {
            tracing::warn!(
                "Refusing to clean {}, it contains the working directory",
                target.display()
            );
            return None;
        }
        Some(target)
    }
}

/// Watch-mode callbacks: clean before each build and report progress.
struct LifecycleHooks {
    clean: Option<PathBuf>,
}

#[async_trait]
impl WatchHooks for LifecycleHooks {
    async fn on_start(&self) {
        if let Some(dir) = &self.clean {
            if let Err(e) = clean_dir(dir).await {
                tracing::warn!("Could not clean {}: {e}", dir.display());
            }
        }
        tracing::info!("Build started");
    }

    async fn on_end(&self) {
        tracing::info!("Build finished, watching for changes...");
    }
}

async fn clean_dir(dir: &Path) -> std::io::Result<()> {
    tracing::info!("Cleaning output directory...");
    match tokio::fs::remove_dir_all(dir).await {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Resolve `.` and `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
