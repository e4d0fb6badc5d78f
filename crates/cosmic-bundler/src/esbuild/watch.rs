//! Watch mode on top of `esbuild --watch`
//!
//! esbuild reports each rebuild on stderr with `[watch]` status lines. These
//! are turned into [`WatchHooks`] calls; every other line is passed through.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::bundler::{WatchHandle, WatchHooks, WatchOptions};
use crate::error::{Error, Result};

/// A build lifecycle marker printed by esbuild in watch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    BuildStarted,
    BuildFinished,
}

impl WatchEvent {
    /// Recognize a `[watch] build started` / `[watch] build finished` line.
    pub fn parse(line: &str) -> Option<Self> {
        let line = console::strip_ansi_codes(line);
        let rest = line.trim().strip_prefix("[watch]")?.trim_start();
        if rest.starts_with("build started") {
            Some(Self::BuildStarted)
        } else if rest.starts_with("build finished") {
            Some(Self::BuildFinished)
        } else {
            None
        }
    }
}

/// Incremental context backed by an `esbuild --watch` child process.
pub struct EsbuildContext {
    pub(super) binary: PathBuf,
    pub(super) working_dir: PathBuf,
    pub(super) args: Vec<String>,
    pub(super) hooks: Arc<dyn WatchHooks>,
}

#[async_trait]
impl WatchHandle for EsbuildContext {
    async fn watch(&mut self, options: WatchOptions) -> Result<()> {
        let watch_flag = if options.forever {
            "--watch=forever"
        } else {
            "--watch"
        };

        // esbuild does not announce the initial build
        self.hooks.on_start().await;

        tracing::debug!(binary = ?self.binary, args = ?self.args, "Starting esbuild in watch mode");
        let mut child = Command::new(&self.binary)
            .args(&self.args)
            .arg(watch_flag)
            .current_dir(&self.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        // Holding stdin open keeps plain `--watch` alive until this process exits
        let _stdin = child.stdin.take();
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Io(std::io::Error::other("esbuild stderr was not captured")))?;
        let mut lines = BufReader::new(stderr).lines();

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => match WatchEvent::parse(&line) {
                        Some(WatchEvent::BuildStarted) => self.hooks.on_start().await,
                        Some(WatchEvent::BuildFinished) => self.hooks.on_end().await,
                        None => eprintln!("{line}"),
                    },
                    None => break,
                },
                _ = &mut ctrl_c => {
                    tracing::debug!("Interrupted, stopping esbuild");
                    child.kill().await?;
                    return Ok(());
                }
            }
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::BuildFailed {
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("[watch] build started (change: \"src/index.ts\")", Some(WatchEvent::BuildStarted))]
    #[case("[watch] build finished", Some(WatchEvent::BuildFinished))]
    #[case("[watch] build finished, watching for changes...", Some(WatchEvent::BuildFinished))]
    #[case("\u{1b}[33m[watch]\u{1b}[0m build finished", Some(WatchEvent::BuildFinished))]
    #[case("\u{1b}[1m\u{1b}[35m[watch]\u{1b}[0m \u{1b}[1mbuild started\u{1b}[0m", Some(WatchEvent::BuildStarted))]
    #[case("  [watch] build started", Some(WatchEvent::BuildStarted))]
    #[case("[watch] stopped", None)]
    #[case("✘ [ERROR] Could not resolve \"missing\"", None)]
    #[case("build finished", None)]
    #[case("", None)]
    fn parse_watch_lines(#[case] line: &str, #[case] expected: Option<WatchEvent>) {
        assert_eq!(WatchEvent::parse(line), expected);
    }
}
