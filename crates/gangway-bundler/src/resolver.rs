//! Export descriptor resolution.
//!
//! For each declared export item this determines the symbol surface and
//! interop shape, synthesizes a bridge module when one is required, and
//! yields the entry import path the config builder will point the backend
//! at.

use std::path::PathBuf;
use std::sync::Arc;

use crate::bridge;
use crate::config::{ExportItem, ModuleFormat, SymbolSpec};
use crate::introspect::{SymbolIntrospector, SymbolSurface};
use crate::scratch::ScratchDir;
use crate::Result;

/// Filesystem/identifier-safe transform of a package name, used to name
/// generated entries and files.
///
/// Strips the scope marker and maps separators to `$`. Not injective:
/// distinct package names can flatten to the same identifier, in which
/// case the later export silently overwrites the earlier one's output.
pub fn flatten_pkg_name(pkg_name: &str) -> String {
    pkg_name
        .strip_prefix('@')
        .unwrap_or(pkg_name)
        .chars()
        .map(|c| match c {
            '/' => '$',
            c if c.is_ascii_alphanumeric() => c,
            '_' | '$' | '.' | '-' => c,
            _ => '_',
        })
        .collect()
}

/// Where an export entry's build starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryImport {
    /// The package itself; no bridging needed.
    Package(String),
    /// A synthesized bridge source on disk.
    Bridge(PathBuf),
}

impl EntryImport {
    /// Import specifier as handed to the backend config.
    pub fn as_specifier(&self) -> String {
        match self {
            EntryImport::Package(name) => name.clone(),
            EntryImport::Bridge(path) => path.to_string_lossy().into_owned(),
        }
    }
}

/// Resolved, per-run view of one export item.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExport {
    pub pkg_name: String,
    pub flat_name: String,
    pub import: EntryImport,
    /// Present only when a bridge was synthesized; `es_module` inside
    /// records the interop shape.
    pub surface: Option<SymbolSurface>,
}

/// Resolves export items into [`ResolvedExport`] descriptors.
pub struct ExportDescriptorResolver {
    introspector: Arc<dyn SymbolIntrospector>,
    scratch: ScratchDir,
}

impl ExportDescriptorResolver {
    pub fn new(introspector: Arc<dyn SymbolIntrospector>, scratch: ScratchDir) -> Self {
        Self {
            introspector,
            scratch,
        }
    }

    /// Resolve one export item.
    ///
    /// Introspection failure in auto mode is fatal for the run and
    /// surfaces as [`crate::Error::SymbolResolution`].
    pub fn resolve(&self, item: &ExportItem) -> Result<ResolvedExport> {
        let flat_name = flatten_pkg_name(&item.name);

        let surface = match &item.symbols {
            None => None,
            Some(SymbolSpec::Auto) => Some(self.introspector.introspect(&item.name)?),
            Some(SymbolSpec::List(symbols)) => Some(SymbolSurface::declared(
                symbols.iter().cloned(),
                item.format == Some(ModuleFormat::Esm),
            )),
        };

        let import = match &surface {
            None => EntryImport::Package(item.name.clone()),
            Some(surface) => {
                let source = bridge::synthesize(&item.name, surface)?;
                let path = self
                    .scratch
                    .persist(&format!("{flat_name}.js"), source.as_str())?;
                EntryImport::Bridge(path)
            }
        };

        Ok(ResolvedExport {
            pkg_name: item.name.clone(),
            flat_name,
            import,
            surface,
        })
    }
}
