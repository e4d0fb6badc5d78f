//! Configuration discovery for cosmic-esbuild
//!
//! Locates an esbuild configuration file across the known search places,
//! parses it with the loader registered for its extension, and flags
//! config locations that are deprecated.

pub mod deprecation;
pub mod error;
pub mod explorer;
pub mod loaders;
pub mod registry;

pub use deprecation::Deprecation;
pub use error::{Error, Result};
pub use explorer::{ConfigResult, Explorer, MODULE_NAME};
pub use loaders::{ModuleLoader, cson_loader, json5_loader, jsonc_loader, toml_loader, yaml_loader};
pub use registry::{Loader, LoaderRegistry, NO_EXT};
