//! Format loaders
//!
//! Each loader turns the raw content of one serialization format into a
//! `serde_json::Value`. Failures carry the file path and the format name so
//! the user can tell which file broke and why.

mod cson;
mod module;

use std::path::Path;

use json_comments::CommentSettings;
use serde_json::Value;

use crate::{Error, Result};

pub use cson::cson_loader;
pub use module::ModuleLoader;

/// Parse JSON that may contain `//` and `/* */` comments.
///
/// Trailing commas are still rejected.
pub fn jsonc_loader(path: &Path, content: &str) -> Result<Value> {
    let stripped = CommentSettings::c_style().strip_comments(content.as_bytes());
    serde_json::from_reader(stripped).map_err(|e| Error::parse(path, "JSONC", e))
}

pub fn json5_loader(path: &Path, content: &str) -> Result<Value> {
    json5::from_str(content).map_err(|e| Error::parse(path, "JSON5", e))
}

pub fn yaml_loader(path: &Path, content: &str) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|e| Error::parse(path, "YAML", e))
}

pub fn toml_loader(path: &Path, content: &str) -> Result<Value> {
    toml::from_str(content).map_err(|e| Error::parse(path, "TOML", e.message()))
}
