//! esbuild driven as a child process
//!
//! [`EsbuildCli`] implements [`Bundler`] by translating [`BuildOptions`] into
//! command-line flags and running the esbuild executable.

mod args;
mod discovery;
mod watch;

pub use args::to_args;
pub use discovery::{BINARY_ENV, find_esbuild};
pub use watch::{EsbuildContext, WatchEvent};

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::bundler::{BuildOutcome, Bundler, WatchHandle, WatchHooks};
use crate::error::{Error, Result};
use crate::options::BuildOptions;

/// The esbuild executable, run from a project directory.
#[derive(Debug, Clone)]
pub struct EsbuildCli {
    binary: PathBuf,
    working_dir: PathBuf,
}

impl EsbuildCli {
    /// Use an explicit esbuild binary.
    pub fn new(binary: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Locate esbuild for the project in `working_dir`. See [`find_esbuild`].
    pub fn discover(working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        let binary = find_esbuild(&working_dir);
        Self {
            binary,
            working_dir,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

#[async_trait]
impl Bundler for EsbuildCli {
    async fn build(&self, options: &BuildOptions) -> Result<BuildOutcome> {
        let args = to_args(options);
        tracing::debug!(binary = ?self.binary, ?args, "Running esbuild");

        let status = Command::new(&self.binary)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| Error::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::BuildFailed {
                code: status.code(),
            });
        }

        Ok(BuildOutcome {
            exit_code: status.code(),
        })
    }

    async fn context(
        &self,
        options: &BuildOptions,
        hooks: Arc<dyn WatchHooks>,
    ) -> Result<Box<dyn WatchHandle>> {
        Ok(Box::new(EsbuildContext {
            binary: self.binary.clone(),
            working_dir: self.working_dir.clone(),
            args: to_args(options),
            hooks,
        }))
    }
}
