//! Error types for cosmic-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a cosmic-esbuild run with exit code 1
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The config file was found but could not be read or parsed
    #[error("Error loading configuration: {0}")]
    ConfigLoad(#[from] cosmic_config::Error),

    /// The config file parsed, but its content is not valid build options
    #[error("Error loading configuration: {0}")]
    InvalidOptions(#[source] serde_json::Error),

    #[error("No entrypoints have been defined.")]
    NoEntryPoints,

    /// Error from the bundler that it did not report itself
    #[error(transparent)]
    Bundler(#[from] cosmic_bundler::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
