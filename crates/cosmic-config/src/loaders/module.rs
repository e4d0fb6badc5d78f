//! Executable config modules (`.js`, `.ts` and their CommonJS/ESM variants)
//!
//! The module is evaluated by a JavaScript runtime in a child process that
//! imports it and prints its default export as JSON on stdout. Anything JSON
//! cannot carry (functions such as plugins) does not survive the trip.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

use crate::{Error, Result};

/// Environment variable overriding the JavaScript runtime executable
pub const RUNTIME_ENV: &str = "COSMIC_ESBUILD_NODE";

const DEFAULT_RUNTIME: &str = "node";

const EVAL_SCRIPT: &str = r#"
const { pathToFileURL } = await import('node:url');
const mod = await import(pathToFileURL(process.argv[1]).href);
let config = mod.default ?? mod;
if (typeof config === 'function') config = await config();
process.stdout.write(JSON.stringify(config ?? null));
"#;

/// Loader for executable config modules.
#[derive(Debug, Clone)]
pub struct ModuleLoader {
    program: OsString,
}

impl Default for ModuleLoader {
    fn default() -> Self {
        let program = std::env::var_os(RUNTIME_ENV)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_RUNTIME.into());
        Self { program }
    }
}

impl ModuleLoader {
    /// Use `program` as the JavaScript runtime.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &std::ffi::OsStr {
        &self.program
    }

    /// Evaluate the module at `path` and return its exported configuration.
    ///
    /// The file content is not needed; the runtime reads the module itself.
    pub fn load(&self, path: &Path, _content: &str) -> Result<Value> {
        let mut cmd = Command::new(&self.program);
        if is_typescript(path) {
            cmd.arg("--experimental-strip-types");
        }
        cmd.arg("--no-warnings")
            .arg("--input-type=module")
            .arg("-e")
            .arg(EVAL_SCRIPT)
            .arg(path);

        tracing::debug!(?path, program = ?self.program, "Evaluating config module");

        let output = cmd.output().map_err(|e| {
            Error::module(
                path,
                format!("failed to run {}: {e}", self.program.to_string_lossy()),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .find(|l| l.contains("Error"))
                .unwrap_or_else(|| stderr.trim())
                .trim()
                .to_string();
            return Err(Error::module(path, message));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&stdout)
            .map_err(|e| Error::module(path, format!("module did not export JSON data: {e}")))
    }
}

fn is_typescript(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("ts" | "cts" | "mts")
    )
}
