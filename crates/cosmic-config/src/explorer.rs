//! Config file discovery
//!
//! The `Explorer` checks a fixed list of search places in priority order and
//! loads the first one that exists. `package.json` only counts when it
//! carries a property named after the module.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{Error, LoaderRegistry, Result};

/// Module name used to derive file names and the `package.json` property
pub const MODULE_NAME: &str = "esbuild";

const MANIFEST: &str = "package.json";

/// Extensions tried for runcom files and canonical config files, in order
const EXTENSIONS: [&str; 13] = [
    "json", "json5", "jsonc", "yaml", "yml", "toml", "js", "ts", "cjs", "mjs", "cts", "mts",
    "cson",
];

/// Outcome of loading a configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigResult {
    /// Parsed configuration, `None` when the file is empty
    pub config: Option<Value>,
    /// Path the configuration was read from
    pub filepath: PathBuf,
    /// Whether the file contained no configuration
    pub is_empty: bool,
}

impl ConfigResult {
    fn new(filepath: PathBuf, config: Value) -> Self {
        if config.is_null() {
            return Self::empty(filepath);
        }
        Self {
            config: Some(config),
            filepath,
            is_empty: false,
        }
    }

    fn empty(filepath: PathBuf) -> Self {
        Self {
            config: None,
            filepath,
            is_empty: true,
        }
    }
}

/// Searches for and loads configuration files.
#[derive(Debug, Clone)]
pub struct Explorer {
    module_name: String,
    search_places: Vec<String>,
    loaders: LoaderRegistry,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(MODULE_NAME)
    }
}

impl Explorer {
    /// Create an explorer with the default search places and loaders for
    /// `module_name`.
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            search_places: default_search_places(module_name),
            loaders: LoaderRegistry::default(),
        }
    }

    /// Replace the loader registry.
    pub fn with_loaders(mut self, loaders: LoaderRegistry) -> Self {
        self.loaders = loaders;
        self
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn search_places(&self) -> &[String] {
        &self.search_places
    }

    pub fn loaders(&self) -> &LoaderRegistry {
        &self.loaders
    }

    /// Look for a configuration file in `dir`.
    ///
    /// Returns `None` when no search place yields a configuration. A file
    /// that exists but fails to parse is an error, not a miss.
    pub fn search(&self, dir: &Path) -> Result<Option<ConfigResult>> {
        for place in &self.search_places {
            let candidate = dir.join(place);
            if !candidate.is_file() {
                continue;
            }
            tracing::debug!(?candidate, "Checking search place");

            if let Some(result) = self.read(&candidate)? {
                return Ok(Some(result));
            }
        }
        Ok(None)
    }

    /// Load the configuration file at `path`.
    pub fn load(&self, path: &Path) -> Result<ConfigResult> {
        tracing::debug!(?path, "Loading explicit config file");
        let result = self.read(path)?;
        Ok(result.unwrap_or_else(|| ConfigResult::empty(path.to_path_buf())))
    }

    /// Read and parse one file. `None` means a manifest without our property.
    fn read(&self, path: &Path) -> Result<Option<ConfigResult>> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        if path.file_name().is_some_and(|name| name == MANIFEST) {
            let manifest = self.loaders.load(path, &content)?;
            return Ok(manifest
                .get(&self.module_name)
                .cloned()
                .map(|config| ConfigResult::new(path.to_path_buf(), config)));
        }

        if content.trim().is_empty() {
            return Ok(Some(ConfigResult::empty(path.to_path_buf())));
        }

        let config = self.loaders.load(path, &content)?;
        Ok(Some(ConfigResult::new(path.to_path_buf(), config)))
    }
}

/// Search places for `module_name`, highest priority first.
pub fn default_search_places(module_name: &str) -> Vec<String> {
    let mut places = vec![MANIFEST.to_string()];

    let runcom = format!(".{module_name}rc");
    places.push(runcom.clone());
    places.extend(EXTENSIONS.iter().map(|ext| format!("{runcom}.{ext}")));

    let folder = format!(".config/{module_name}rc");
    places.push(folder.clone());
    places.extend(EXTENSIONS.iter().map(|ext| format!("{folder}.{ext}")));

    places.extend(
        EXTENSIONS
            .iter()
            .map(|ext| format!("{module_name}.config.{ext}")),
    );
    places
}
