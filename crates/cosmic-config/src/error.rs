//! Error types for cosmic-config

use std::path::PathBuf;

/// Result type for cosmic-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing {format} file at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Error loading config module at {path}: {message}")]
    Module { path: PathBuf, message: String },

    #[error("No loader specified for extension \"{extension}\"")]
    NoLoader { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, format: &str, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            format: format.into(),
            message: message.to_string(),
        }
    }

    pub fn module(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Module {
            path: path.into(),
            message: message.into(),
        }
    }
}
