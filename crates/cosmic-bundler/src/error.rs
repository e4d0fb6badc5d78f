//! Error types for bundler operations

use std::path::PathBuf;

/// Errors raised while driving the bundler
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bundler executable could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bundler ran and reported failure; its own output explains why
    #[error("esbuild exited with {}", exit_description(.code))]
    BuildFailed { code: Option<i32> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;
