//! Translation of [`BuildOptions`] into esbuild command-line arguments

use heck::ToKebabCase;
use serde_json::Value;

use crate::options::{BuildOptions, EntryPoint, EntryPoints, Sourcemap};

/// Build the esbuild argument list for `options`.
///
/// Entry points come first, followed by flags in a stable order. Options in
/// `extra` are passed as `--kebab-case=value`; list and map options use the
/// repeated, comma-joined or `key=value` form esbuild expects. Options the
/// CLI cannot express are skipped with a warning.
pub fn to_args(options: &BuildOptions) -> Vec<String> {
    let mut args = Vec::new();

    match &options.entry_points {
        Some(EntryPoints::List(list)) => {
            for entry in list {
                match entry {
                    EntryPoint::Path(path) => args.push(path.clone()),
                    EntryPoint::InOut { input, output } => args.push(format!("{output}={input}")),
                }
            }
        }
        Some(EntryPoints::Map(map)) => {
            args.extend(map.iter().map(|(output, input)| format!("{output}={input}")));
        }
        None => {}
    }

    flag(&mut args, "--bundle", options.bundle);
    if let Some(define) = &options.define {
        args.extend(define.iter().map(|(k, v)| format!("--define:{k}={v}")));
    }
    if let Some(external) = &options.external {
        args.extend(external.iter().map(|m| format!("--external:{m}")));
    }
    if let Some(format) = options.format {
        args.push(format!("--format={format}"));
    }
    if let Some(loader) = &options.loader {
        args.extend(loader.iter().map(|(ext, name)| {
            let ext = if ext.starts_with('.') {
                ext.clone()
            } else {
                format!(".{ext}")
            };
            format!("--loader:{ext}={name}")
        }));
    }
    flag(&mut args, "--minify", options.minify);
    if let Some(outdir) = &options.outdir {
        args.push(format!("--outdir={}", outdir.display()));
    }
    if let Some(outfile) = &options.outfile {
        args.push(format!("--outfile={}", outfile.display()));
    }
    if let Some(outbase) = &options.outbase {
        args.push(format!("--outbase={}", outbase.display()));
    }
    if let Some(packages) = options.packages {
        args.push(format!("--packages={packages}"));
    }
    if let Some(platform) = options.platform {
        args.push(format!("--platform={platform}"));
    }
    match options.sourcemap {
        Some(Sourcemap::Enabled(true)) => args.push("--sourcemap".into()),
        Some(Sourcemap::Kind(kind)) => args.push(format!("--sourcemap={kind}")),
        Some(Sourcemap::Enabled(false)) | None => {}
    }
    flag(&mut args, "--splitting", options.splitting);
    if let Some(target) = &options.target {
        if !target.0.is_empty() {
            args.push(format!("--target={}", target.0.join(",")));
        }
    }
    flag(&mut args, "--allow-overwrite", options.allow_overwrite);
    if let Some(level) = &options.log_level {
        args.push(format!("--log-level={level}"));
    }

    for (key, value) in &options.extra {
        push_extra(&mut args, key, value);
    }

    args
}

fn flag(args: &mut Vec<String>, name: &str, value: Option<bool>) {
    if value == Some(true) {
        args.push(name.to_string());
    }
}

/// Options that only exist in esbuild's JavaScript API.
const API_ONLY: [&str; 6] = [
    "absWorkingDir",
    "mangleCache",
    "nodePaths",
    "plugins",
    "stdin",
    "write",
];

/// How a list or map option is spelled on the esbuild command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    /// `--inject:a --inject:b`
    Repeated,
    /// `--main-fields=a,b`
    Joined,
    /// `--banner:js=...`
    Keyed,
}

fn form_of(key: &str) -> Option<Form> {
    match key {
        "drop" | "inject" | "pure" => Some(Form::Repeated),
        "conditions" | "dropLabels" | "mainFields" | "resolveExtensions" => Some(Form::Joined),
        "alias" | "banner" | "footer" | "logOverride" | "outExtension" | "supported" => {
            Some(Form::Keyed)
        }
        _ => None,
    }
}

/// Translate one option without a typed field.
fn push_extra(args: &mut Vec<String>, key: &str, value: &Value) {
    if API_ONLY.contains(&key) {
        tracing::warn!("Option \"{key}\" is not supported by the esbuild CLI and was ignored");
        return;
    }

    let name = key.to_kebab_case();
    match (key, value) {
        (_, Value::Null) => {}
        // CLI form takes an output path
        ("metafile", Value::Bool(true)) => {
            tracing::warn!(
                "Option \"metafile\" needs a file path on the esbuild CLI, e.g. \"meta.json\"; ignored"
            );
        }
        ("metafile", Value::Bool(false)) => {}
        ("tsconfigRaw", Value::Object(_)) => args.push(format!("--{name}={value}")),
        (_, Value::Bool(true)) => args.push(format!("--{name}")),
        (_, Value::Bool(false)) => args.push(format!("--{name}=false")),
        (_, Value::String(s)) => args.push(format!("--{name}={s}")),
        (_, Value::Number(n)) => args.push(format!("--{name}={n}")),
        (_, Value::Array(items)) => {
            let Some(items) = items.iter().map(scalar).collect::<Option<Vec<_>>>() else {
                unsupported(key);
                return;
            };
            match form_of(key) {
                Some(Form::Repeated) => {
                    args.extend(items.iter().map(|item| format!("--{name}:{item}")));
                }
                Some(Form::Joined) => args.push(format!("--{name}={}", items.join(","))),
                _ => unsupported(key),
            }
        }
        (_, Value::Object(map)) => {
            if form_of(key) != Some(Form::Keyed) {
                unsupported(key);
                return;
            }
            let Some(pairs) = map
                .iter()
                .map(|(k, v)| scalar(v).map(|v| format!("--{name}:{k}={v}")))
                .collect::<Option<Vec<_>>>()
            else {
                unsupported(key);
                return;
            };
            args.extend(pairs);
        }
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn unsupported(key: &str) {
    tracing::warn!("Option \"{key}\" has no esbuild CLI form and was ignored");
}
