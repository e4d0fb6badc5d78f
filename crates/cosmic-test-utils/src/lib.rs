//! Shared test utilities for the cosmic-esbuild workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] temporary project directories
//! - [`bundler`]: [`RecordingBundler`], a bundler double that records calls
//! - [`runtime`]: checks for runtimes such as `node`

pub mod bundler;
pub mod project;
pub mod runtime;

pub use bundler::RecordingBundler;
pub use project::TestProject;
pub use runtime::node_available;
