//! cosmic-esbuild command-line front-end
//!
//! Discovers an esbuild configuration file, layers CLI flags on top of it
//! and hands the result to a [`cosmic_bundler::Bundler`] for a one-shot
//! build or watch mode.

pub mod cli;
pub mod error;
pub mod logging;
pub mod merge;
pub mod runner;

pub use cli::Cli;
pub use error::{CliError, Result};
pub use merge::merge_options;
pub use runner::CosmicEsbuild;
