//! Build configuration types.
//!
//! `BuildConfig` describes one ESM bundling run: the package's main entry
//! point, the imports map consumed by the externals collaborator, and the
//! ordered list of public re-exports to bundle. Use the builder pattern
//! methods for ergonomic configuration, or construct directly for full
//! control.

use indexmap::IndexMap;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// Versioned dependency map contributed by one providing package.
///
/// Keys are imported package names, values are version constraints. The
/// externals collaborator consumes these verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportSpec(pub IndexMap<String, String>);

impl<K, V, const N: usize> From<[(K, V); N]> for ImportSpec
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// How the exported symbol surface of a re-export is determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolSpec {
    /// Introspect the loaded package at build time.
    Auto,
    /// Explicit ordered list of exported identifier names.
    List(Vec<String>),
}

impl Serialize for SymbolSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SymbolSpec::Auto => serializer.serialize_str("auto"),
            SymbolSpec::List(symbols) => symbols.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SymbolSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SymbolSpecVisitor;

        impl<'de> Visitor<'de> for SymbolSpecVisitor {
            type Value = SymbolSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"auto\" or a list of symbol names")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<SymbolSpec, E> {
                if value == "auto" {
                    Ok(SymbolSpec::Auto)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SymbolSpec, A::Error> {
                let mut symbols = Vec::new();
                while let Some(symbol) = seq.next_element::<String>()? {
                    symbols.push(symbol);
                }
                Ok(SymbolSpec::List(symbols))
            }
        }

        deserializer.deserialize_any(SymbolSpecVisitor)
    }
}

/// Interop format tag a re-export may declare for its source module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// The source module already follows ESM default/named conventions.
    Esm,
    /// Plain CommonJS export object.
    Cjs,
}

/// One declared public re-export of the package being built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportItem {
    /// Package/module name being re-exported.
    pub name: String,

    /// Exported symbol surface: absent (no bridge), `"auto"`, or explicit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<SymbolSpec>,

    /// Optional interop format tag for the source module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ModuleFormat>,
}

impl ExportItem {
    /// Create a re-export with no declared symbols (no bridge is synthesized).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbols: None,
            format: None,
        }
    }

    /// Introspect the symbol surface at build time.
    pub fn auto_symbols(mut self) -> Self {
        self.symbols = Some(SymbolSpec::Auto);
        self
    }

    /// Declare the symbol surface explicitly.
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = Some(SymbolSpec::List(
            symbols.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Tag the source module with an interop format.
    pub fn format(mut self, format: ModuleFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Configuration for one ESM bundling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Path to the package's primary entry source, relative to the
    /// project directory. When absent, no index bundle is produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// Imports map: providing package name to its dependency spec.
    /// Consumed by the externals collaborator; declaration order is
    /// preserved.
    #[serde(default)]
    pub imports: IndexMap<String, ImportSpec>,

    /// Public re-exports, bundled strictly in declaration order.
    #[serde(default)]
    pub exports: Vec<ExportItem>,

    /// Target directory for emitted bundles.
    pub output: PathBuf,

    /// Persist each export's generated config as an inspectable artifact.
    #[serde(default)]
    pub report: bool,
}

impl BuildConfig {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            main: None,
            imports: IndexMap::new(),
            exports: Vec::new(),
            output: output.into(),
            report: false,
        }
    }

    /// Set the primary entry source path.
    pub fn main(mut self, main: impl Into<String>) -> Self {
        self.main = Some(main.into());
        self
    }

    /// Add one providing package to the imports map.
    pub fn import(mut self, provider: impl Into<String>, spec: impl Into<ImportSpec>) -> Self {
        self.imports.insert(provider.into(), spec.into());
        self
    }

    /// Append a re-export (declaration order is build order).
    pub fn export(mut self, item: ExportItem) -> Self {
        self.exports.push(item);
        self
    }

    /// Enable or disable config reporting.
    pub fn report(mut self, enabled: bool) -> Self {
        self.report = enabled;
        self
    }
}

/// External build-mode signal (development vs production).
///
/// Controls whether source maps are cheap and whether minification
/// settings favor debuggability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

impl BuildMode {
    /// Read the build mode from the `NODE_ENV` environment variable.
    ///
    /// Anything other than `development` means production.
    pub fn from_env() -> Self {
        match std::env::var("NODE_ENV") {
            Ok(value) if value == "development" => BuildMode::Development,
            _ => BuildMode::Production,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }

    /// Source-map strategy for this mode, in backend `devtool` terms.
    pub fn devtool(&self) -> Option<&'static str> {
        match self {
            BuildMode::Development => Some("cheap-source-map"),
            BuildMode::Production => None,
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options forwarded verbatim to the transpile collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspileOptions {
    /// Preset names, e.g. `@babel/preset-env`.
    #[serde(default)]
    pub presets: Vec<String>,
}

impl TranspileOptions {
    pub fn new<I, S>(presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            presets: presets.into_iter().map(Into::into).collect(),
        }
    }

    /// Fixed presets used for export-entry script transpilation.
    pub fn export_defaults() -> Self {
        Self::new(["@babel/preset-env", "@babel/preset-react"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_deserialize_auto() {
        let item: ExportItem =
            serde_json::from_str(r#"{"name": "classnames", "symbols": "auto"}"#).unwrap();
        assert_eq!(item.symbols, Some(SymbolSpec::Auto));
    }

    #[test]
    fn symbols_deserialize_list() {
        let item: ExportItem =
            serde_json::from_str(r#"{"name": "lib", "symbols": ["a", "b"]}"#).unwrap();
        assert_eq!(
            item.symbols,
            Some(SymbolSpec::List(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn symbols_reject_other_strings() {
        let result = serde_json::from_str::<ExportItem>(r#"{"name": "lib", "symbols": "all"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn symbols_absent_by_default() {
        let item: ExportItem = serde_json::from_str(r#"{"name": "lib"}"#).unwrap();
        assert_eq!(item.symbols, None);
        assert_eq!(item.format, None);
    }

    #[test]
    fn format_deserializes_esm_tag() {
        let item: ExportItem =
            serde_json::from_str(r#"{"name": "lib", "symbols": [], "format": "esm"}"#).unwrap();
        assert_eq!(item.format, Some(ModuleFormat::Esm));
    }

    #[test]
    fn build_config_preserves_import_order() {
        let config: BuildConfig = serde_json::from_str(
            r#"{
                "imports": {
                    "provider-b": {"pkg-one": "*"},
                    "provider-a": {"pkg-two": ">=1.0.0"}
                },
                "output": "build/esm"
            }"#,
        )
        .unwrap();

        let providers: Vec<_> = config.imports.keys().cloned().collect();
        assert_eq!(providers, ["provider-b", "provider-a"]);
        assert_eq!(config.main, None);
        assert!(!config.report);
    }

    #[test]
    fn build_mode_devtool_split() {
        assert_eq!(BuildMode::Development.devtool(), Some("cheap-source-map"));
        assert_eq!(BuildMode::Production.devtool(), None);
        assert_eq!(BuildMode::Production.as_str(), "production");
    }
}
