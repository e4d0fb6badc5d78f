//! The bundler seam
//!
//! The front-end only ever talks to a bundler through these traits, so the
//! esbuild process driver can be swapped for a test double.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{BuildOptions, Result};

/// Result of a successful one-shot build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildOutcome {
    /// Exit code reported by the bundler process, if any
    pub exit_code: Option<i32>,
}

/// Options for [`WatchHandle::watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchOptions {
    /// Keep watching even after standard input closes
    pub forever: bool,
}

/// Lifecycle callbacks invoked by the bundler's scheduler in watch mode.
#[async_trait]
pub trait WatchHooks: Send + Sync {
    /// A build (initial or incremental) is about to start.
    async fn on_start(&self);

    /// A build finished, successfully or not.
    async fn on_end(&self);
}

/// Incremental build context returned by [`Bundler::context`].
#[async_trait]
pub trait WatchHandle: Send {
    /// Watch the file system and rebuild on change until the process ends.
    async fn watch(&mut self, options: WatchOptions) -> Result<()>;
}

/// A bundler exposing one-shot and incremental builds.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn build(&self, options: &BuildOptions) -> Result<BuildOutcome>;

    async fn context(
        &self,
        options: &BuildOptions,
        hooks: Arc<dyn WatchHooks>,
    ) -> Result<Box<dyn WatchHandle>>;
}
