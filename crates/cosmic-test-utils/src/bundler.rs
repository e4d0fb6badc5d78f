//! [`RecordingBundler`], a [`Bundler`] double that records every call.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cosmic_bundler::{
    BuildOptions, BuildOutcome, Bundler, Error, Result, WatchHandle, WatchHooks, WatchOptions,
};

#[derive(Default)]
struct Calls {
    builds: Vec<BuildOptions>,
    contexts: Vec<BuildOptions>,
    watches: Vec<WatchOptions>,
}

/// Records build and watch requests instead of running esbuild.
///
/// Clones share their recorded calls, so a test can hand one clone to the
/// code under test and inspect the other afterwards.
///
/// In watch mode the fake context fires one initial start/end pair plus
/// `rebuilds` more, then returns.
#[derive(Clone, Default)]
pub struct RecordingBundler {
    calls: Arc<Mutex<Calls>>,
    fail_with: Option<i32>,
    rebuilds: usize,
}

impl RecordingBundler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every build fail with `code`.
    pub fn failing(code: i32) -> Self {
        Self {
            fail_with: Some(code),
            ..Self::default()
        }
    }

    /// Simulate `count` incremental rebuilds after the initial watch build.
    pub fn with_rebuilds(mut self, count: usize) -> Self {
        self.rebuilds = count;
        self
    }

    /// Options passed to each `build` call, in order.
    pub fn builds(&self) -> Vec<BuildOptions> {
        self.calls.lock().unwrap().builds.clone()
    }

    /// Options passed to each `context` call, in order.
    pub fn contexts(&self) -> Vec<BuildOptions> {
        self.calls.lock().unwrap().contexts.clone()
    }

    /// Options passed to each `watch` call, in order.
    pub fn watches(&self) -> Vec<WatchOptions> {
        self.calls.lock().unwrap().watches.clone()
    }
}

#[async_trait]
impl Bundler for RecordingBundler {
    async fn build(&self, options: &BuildOptions) -> Result<BuildOutcome> {
        self.calls.lock().unwrap().builds.push(options.clone());
        match self.fail_with {
            Some(code) => Err(Error::BuildFailed { code: Some(code) }),
            None => Ok(BuildOutcome { exit_code: Some(0) }),
        }
    }

    async fn context(
        &self,
        options: &BuildOptions,
        hooks: Arc<dyn WatchHooks>,
    ) -> Result<Box<dyn WatchHandle>> {
        self.calls.lock().unwrap().contexts.push(options.clone());
        Ok(Box::new(FakeWatch {
            calls: Arc::clone(&self.calls),
            hooks,
            rebuilds: self.rebuilds,
        }))
    }
}

struct FakeWatch {
    calls: Arc<Mutex<Calls>>,
    hooks: Arc<dyn WatchHooks>,
    rebuilds: usize,
}

#[async_trait]
impl WatchHandle for FakeWatch {
    async fn watch(&mut self, options: WatchOptions) -> Result<()> {
        self.calls.lock().unwrap().watches.push(options);
        for _ in 0..=self.rebuilds {
            self.hooks.on_start().await;
            self.hooks.on_end().await;
        }
        Ok(())
    }
}
