//! esbuild build options
//!
//! Only the options the front-end reads or writes are typed. Every other key
//! of a config file lands in [`BuildOptions::extra`] and is still handed to
//! the bundler.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options passed to the bundler's `build` and `context` entry points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_points: Option<EntryPoints>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub define: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,

    /// File extension (with leading dot) to loader name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outfile: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbase: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Packages>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<Sourcemap>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub splitting: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_overwrite: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Options without a typed field, keyed by their camelCase name
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BuildOptions {
    /// Whether at least one entry point is configured.
    pub fn has_entry_points(&self) -> bool {
        self.entry_points.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// Entry points in any of the shapes esbuild accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryPoints {
    List(Vec<EntryPoint>),
    /// Output name to input path
    Map(BTreeMap<String, String>),
}

impl EntryPoints {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(
            paths
                .into_iter()
                .map(|p| EntryPoint::Path(p.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(list) => list.is_empty(),
            Self::Map(map) => map.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryPoint {
    Path(String),
    InOut {
        #[serde(rename = "in")]
        input: String,
        #[serde(rename = "out")]
        output: String,
    },
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!(
                        "invalid value '{other}', expected one of: {}",
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

string_enum! {
    /// Output module format
    Format { Iife => "iife", Cjs => "cjs", Esm => "esm" }
}

string_enum! {
    /// Whether package imports are bundled or left external
    Packages { Bundle => "bundle", External => "external" }
}

string_enum! {
    Platform { Browser => "browser", Node => "node", Neutral => "neutral" }
}

string_enum! {
    SourcemapKind { Linked => "linked", Inline => "inline", External => "external", Both => "both" }
}

/// `true`/`false` or a named source map mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sourcemap {
    Enabled(bool),
    Kind(SourcemapKind),
}

/// One or more target environments (`es2020`, `chrome58`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany", into = "Vec<String>")]
pub struct Target(pub Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Target {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(one) => Self(vec![one]),
            OneOrMany::Many(many) => Self(many),
        }
    }
}

impl From<Target> for Vec<String> {
    fn from(target: Target) -> Self {
        target.0
    }
}
