//! Bundler integration for cosmic-esbuild
//!
//! This crate models the esbuild build options and drives the bundler:
//!
//! - [`BuildOptions`] and its typed option values
//! - the [`Bundler`] / [`WatchHandle`] / [`WatchHooks`] traits the CLI is written against
//! - [`EsbuildCli`], which runs the esbuild executable as a child process
//!
//! The bundler itself stays a black box: this crate never compiles,
//! resolves or emits anything on its own.

pub mod bundler;
pub mod error;
pub mod esbuild;
pub mod options;

pub use bundler::{BuildOutcome, Bundler, WatchHandle, WatchHooks, WatchOptions};
pub use error::{Error, Result};
pub use esbuild::{EsbuildCli, WatchEvent};
pub use options::{
    BuildOptions, EntryPoint, EntryPoints, Format, Packages, Platform, Sourcemap, SourcemapKind,
    Target,
};
