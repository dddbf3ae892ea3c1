//! Symbol-surface introspection for re-exported packages.
//!
//! When an export declares `symbols: "auto"`, the actual exported shape of
//! the package has to be observed at build time. `SymbolIntrospector` is
//! the pluggable seam for that capability: the shipped [`NodeIntrospector`]
//! shells out to the Node.js runtime, other implementations may parse
//! published declaration metadata instead. Correctness of auto mode
//! degrades to whatever the introspector can observe.

use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;

use crate::{Error, Result};

/// The observed (or declared) export surface of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSurface {
    /// Exported identifier names, in declaration/observation order.
    pub names: Vec<String>,
    /// Whether the export object carries the ESM interop marker.
    pub es_module: bool,
}

impl SymbolSurface {
    /// Build a synthetic surface from explicitly declared symbols.
    pub fn declared<I, S>(symbols: I, es_module: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: symbols.into_iter().map(Into::into).collect(),
            es_module,
        }
    }

    /// Names re-exported as named bindings: everything except `default`,
    /// which is handled separately by the bridge templates.
    pub fn named(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| *name != "default")
    }
}

/// Pluggable symbol-surface introspector.
///
/// `introspect` is synchronous by contract: symbol discovery is a
/// prerequisite for config generation and happens before any backend
/// build starts.
pub trait SymbolIntrospector: Send + Sync {
    fn introspect(&self, pkg_name: &str) -> Result<SymbolSurface>;
}

/// Introspector that loads the package through the Node.js runtime.
///
/// Resolution starts from the project directory so the package is found
/// the same way the built code would find it at runtime.
#[derive(Debug, Clone)]
pub struct NodeIntrospector {
    project_dir: PathBuf,
    node_command: String,
}

// Loads the package with require() and prints its live export shape.
const INTROSPECT_SCRIPT: &str = r#"
const pkg = process.argv[1];
const m = require(require.resolve(pkg, {paths: [process.cwd()]}));
process.stdout.write(JSON.stringify({esModule: !!m.__esModule, keys: Object.keys(m)}));
"#;

#[derive(Deserialize)]
struct IntrospectOutput {
    #[serde(rename = "esModule")]
    es_module: bool,
    keys: Vec<String>,
}

impl NodeIntrospector {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            node_command: "node".to_string(),
        }
    }

    /// Override the runtime binary (e.g. an absolute path to `node`).
    pub fn node_command(mut self, command: impl Into<String>) -> Self {
        self.node_command = command.into();
        self
    }

    fn resolution_error(&self, pkg_name: &str, message: impl Into<String>) -> Error {
        Error::SymbolResolution {
            package: pkg_name.to_string(),
            message: message.into(),
        }
    }
}

impl SymbolIntrospector for NodeIntrospector {
    fn introspect(&self, pkg_name: &str) -> Result<SymbolSurface> {
        let output = Command::new(&self.node_command)
            .arg("-e")
            .arg(INTROSPECT_SCRIPT)
            .arg(pkg_name)
            .current_dir(&self.project_dir)
            .output()
            .map_err(|err| self.resolution_error(pkg_name, err.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.resolution_error(pkg_name, stderr.trim().to_string()));
        }

        let parsed: IntrospectOutput = serde_json::from_slice(&output.stdout)
            .map_err(|err| self.resolution_error(pkg_name, format!("bad introspector output: {err}")))?;

        Ok(SymbolSurface {
            names: parsed.keys,
            es_module: parsed.es_module,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_excludes_default() {
        let surface = SymbolSurface::declared(["default", "render", "hydrate"], true);
        let named: Vec<_> = surface.named().collect();
        assert_eq!(named, ["render", "hydrate"]);
    }

    #[test]
    fn declared_surface_keeps_order() {
        let surface = SymbolSurface::declared(["b", "a"], false);
        assert_eq!(surface.names, ["b", "a"]);
        assert!(!surface.es_module);
    }

    #[test]
    fn missing_runtime_is_a_resolution_error() {
        let introspector =
            NodeIntrospector::new(".").node_command("gangway-test-no-such-binary");
        let err = introspector.introspect("some-pkg").unwrap_err();
        match err {
            Error::SymbolResolution { package, .. } => assert_eq!(package, "some-pkg"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
