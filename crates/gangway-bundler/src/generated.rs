//! Serializable model of one generated backend build configuration.
//!
//! One of these exists per entry (index plus each export). It is handed
//! to the backend collaborator exactly once and, when reporting is
//! enabled, persisted verbatim as a JSON artifact. Never mutated after
//! creation.

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBuildConfig {
    /// Entry key (namespaced bundle name) to import descriptor.
    pub entry: IndexMap<String, EntryDescriptor>,
    pub experiments: Experiments,
    /// Imported package name to externals descriptor.
    pub externals: IndexMap<String, String>,
    pub externals_type: String,
    pub module: ModuleSection,
    pub optimization: Optimization,
    pub output: OutputSection,
    pub resolve: ResolveSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,
    pub mode: String,
}

impl GeneratedBuildConfig {
    /// Pretty-printed JSON, as persisted for inspection.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryDescriptor {
    pub import: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiments {
    pub output_module: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSection {
    pub rules: Vec<TranspileRule>,
}

/// One file-class rule delegated to the transpile collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranspileRule {
    /// Source-file pattern (regex source text).
    pub test: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(rename = "use")]
    pub use_: RuleUse,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleUse {
    pub loader: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub minimize: bool,
    pub minimizer: MinimizerOptions,
}

/// Minifier settings. Class and function names are preserved because
/// downstream code may rely on runtime name reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MinimizerOptions {
    pub keep_classnames: bool,
    pub keep_fnames: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSection {
    pub environment: OutputEnvironment,
    pub filename: String,
    pub library: OutputLibrary,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputEnvironment {
    pub dynamic_import: bool,
    pub module: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLibrary {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveSection {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    pub fallback: ResolveFallback,
}

/// Node built-ins that must not be polyfilled into ESM output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolveFallback {
    pub path: bool,
}
