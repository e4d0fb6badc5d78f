//! Extension-keyed loader registry

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::loaders::{
    ModuleLoader, cson_loader, json5_loader, jsonc_loader, toml_loader, yaml_loader,
};
use crate::{Error, Result};

/// Registry key for files without an extension (e.g. `.esbuildrc`)
pub const NO_EXT: &str = "noExt";

/// Converts raw file content into a structured config value.
pub trait Loader: Send + Sync {
    fn load(&self, path: &Path, content: &str) -> Result<Value>;
}

impl<F> Loader for F
where
    F: Fn(&Path, &str) -> Result<Value> + Send + Sync,
{
    fn load(&self, path: &Path, content: &str) -> Result<Value> {
        self(path, content)
    }
}

impl Loader for ModuleLoader {
    fn load(&self, path: &Path, content: &str) -> Result<Value> {
        ModuleLoader::load(self, path, content)
    }
}

/// Map from file extension (with leading dot) to loader.
#[derive(Clone)]
pub struct LoaderRegistry {
    loaders: BTreeMap<String, Arc<dyn Loader>>,
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("extensions", &self.loaders.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        let module: Arc<dyn Loader> = Arc::new(ModuleLoader::default());

        let mut registry = Self::empty();
        registry
            .register(".json", jsonc_loader)
            .register(".jsonc", jsonc_loader)
            .register(".json5", json5_loader)
            .register(".yaml", yaml_loader)
            .register(".yml", yaml_loader)
            .register(NO_EXT, yaml_loader)
            .register(".toml", toml_loader)
            .register(".cson", cson_loader);
        for ext in [".js", ".cjs", ".mjs", ".ts", ".cts", ".mts"] {
            registry.loaders.insert(ext.to_string(), Arc::clone(&module));
        }
        registry
    }
}

impl LoaderRegistry {
    /// A registry with no loaders at all.
    pub fn empty() -> Self {
        Self {
            loaders: BTreeMap::new(),
        }
    }

    /// Register `loader` for `extension`, replacing any previous loader.
    pub fn register(&mut self, extension: &str, loader: impl Loader + 'static) -> &mut Self {
        self.loaders
            .insert(normalize_extension(extension), Arc::new(loader));
        self
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    pub fn get(&self, extension: &str) -> Option<&Arc<dyn Loader>> {
        self.loaders.get(&normalize_extension(extension))
    }

    /// Registry key for the file at `path`.
    pub fn key_for(path: &Path) -> String {
        path.extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_else(|| NO_EXT.to_string())
    }

    /// Parse `content` with the loader registered for `path`'s extension.
    pub fn load(&self, path: &Path, content: &str) -> Result<Value> {
        let key = Self::key_for(path);
        let loader = self
            .get(&key)
            .ok_or_else(|| Error::NoLoader { extension: key.clone() })?;
        loader.load(path, content)
    }
}

fn normalize_extension(extension: &str) -> String {
    if extension == NO_EXT || extension.starts_with('.') {
        extension.to_string()
    } else {
        format!(".{extension}")
    }
}
