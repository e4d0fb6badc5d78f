//! Detection of deprecated config locations

use std::fmt;
use std::path::Path;

/// A config location that still works but should be migrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    /// Options stored under a property of `package.json`
    PackageJson { module_name: String },
    /// A hidden runcom file in the project root (`.esbuildrc`, `.esbuildrc.json`, ...)
    HiddenFile { name: String, module_name: String },
}

impl Deprecation {
    /// Classify the config file at `path` for a project rooted at `root`.
    /// Returns `None` for locations that are not deprecated.
    ///
    /// Runcom files only count when they sit directly in `root`; a file
    /// passed explicitly from elsewhere is left alone.
    pub fn detect(path: &Path, root: &Path, module_name: &str) -> Option<Self> {
        let name = path.file_name()?.to_str()?;

        if name == "package.json" {
            return Some(Self::PackageJson {
                module_name: module_name.to_string(),
            });
        }

        let runcom = format!(".{module_name}rc");
        let is_runcom = name == runcom
            || name
                .strip_prefix(runcom.as_str())
                .is_some_and(|rest| rest.starts_with('.'));
        let in_root = path.parent().is_some_and(|parent| parent == root);
        (is_runcom && in_root).then(|| Self::HiddenFile {
            name: name.to_string(),
            module_name: module_name.to_string(),
        })
    }
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageJson { module_name } => write!(
                f,
                "Configuration options in package.json are deprecated, use {module_name}.config.* instead"
            ),
            Self::HiddenFile { name, module_name } => write!(
                f,
                "Hidden configuration files like {name} are deprecated, use {module_name}.config.* instead"
            ),
        }
    }
}
