//! Locating the esbuild executable

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an esbuild binary
pub const BINARY_ENV: &str = "ESBUILD_BINARY_PATH";

const BINARY_NAME: &str = if cfg!(windows) { "esbuild.cmd" } else { "esbuild" };

/// Find esbuild for a project rooted at `working_dir`.
///
/// Tries, in order: `ESBUILD_BINARY_PATH`, the project's
/// `node_modules/.bin/esbuild`, and finally `esbuild` on `PATH`.
pub fn find_esbuild(working_dir: &Path) -> PathBuf {
    find_esbuild_with(std::env::var_os(BINARY_ENV), working_dir)
}

pub(crate) fn find_esbuild_with(env_override: Option<OsString>, working_dir: &Path) -> PathBuf {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        tracing::debug!(?path, "Using esbuild from {}", BINARY_ENV);
        return PathBuf::from(path);
    }

    let local = working_dir
        .join("node_modules")
        .join(".bin")
        .join(BINARY_NAME);
    if local.is_file() {
        tracing::debug!(path = ?local, "Using project-local esbuild");
        return local;
    }

    PathBuf::from(BINARY_NAME)
}
