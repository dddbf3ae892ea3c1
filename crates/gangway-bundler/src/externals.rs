//! Externals assembly.
//!
//! Externals tell the bundling backend which imports to leave unresolved,
//! deferring them to the runtime module system. The actual imports ->
//! externals transformation is delegated to an [`ExternalsProvider`];
//! this module scopes the transitive-resolution depth per entry kind and
//! strips self-referential entries from export configs.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::config::ImportSpec;
use crate::Result;

/// Depth for the index entry.
pub const INDEX_DEPTH: u8 = 2;

/// Depth for export entries: one extra level, because an export must also
/// externalize what its bridge module itself imports.
pub const EXPORT_DEPTH: u8 = 3;

/// Collaborator that converts an imports map into an externals map.
///
/// Keys of the result are imported package names; values are externals
/// descriptors consumable by the backend. `depth` bounds transitive
/// dependency resolution for providers that compute closures.
pub trait ExternalsProvider: Send + Sync {
    fn assemble(
        &self,
        imports: &IndexMap<String, ImportSpec>,
        depth: u8,
    ) -> Result<IndexMap<String, String>>;
}

/// Default provider: externalizes every imported package as a
/// bare-specifier module descriptor (`module <pkg>`), deferring
/// resolution to the runtime import map. Ignores `depth`; it computes no
/// dependency closure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportMapExternals;

impl ExternalsProvider for ImportMapExternals {
    fn assemble(
        &self,
        imports: &IndexMap<String, ImportSpec>,
        _depth: u8,
    ) -> Result<IndexMap<String, String>> {
        let mut externals = IndexMap::new();
        for spec in imports.values() {
            for pkg_name in spec.0.keys() {
                externals.insert(pkg_name.clone(), format!("module {pkg_name}"));
            }
        }
        Ok(externals)
    }
}

/// Depth-scoping wrapper around an [`ExternalsProvider`].
#[derive(Clone)]
pub struct ExternalsAssembler {
    provider: Arc<dyn ExternalsProvider>,
}

impl ExternalsAssembler {
    pub fn new(provider: Arc<dyn ExternalsProvider>) -> Self {
        Self { provider }
    }

    /// Externals for the index entry.
    pub fn for_index(
        &self,
        imports: &IndexMap<String, ImportSpec>,
    ) -> Result<IndexMap<String, String>> {
        self.provider.assemble(imports, INDEX_DEPTH)
    }

    /// Externals for one export entry. The export's own package name is
    /// always stripped: externalizing it would create an unresolvable
    /// self-import at runtime.
    pub fn for_export(
        &self,
        imports: &IndexMap<String, ImportSpec>,
        pkg_name: &str,
    ) -> Result<IndexMap<String, String>> {
        let mut externals = self.provider.assemble(imports, EXPORT_DEPTH)?;
        externals.shift_remove(pkg_name);
        Ok(externals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::Mutex;

    struct DepthRecorder {
        depths: Mutex<Vec<u8>>,
    }

    impl ExternalsProvider for DepthRecorder {
        fn assemble(
            &self,
            imports: &IndexMap<String, ImportSpec>,
            depth: u8,
        ) -> Result<IndexMap<String, String>> {
            self.depths.lock().unwrap().push(depth);
            ImportMapExternals.assemble(imports, depth)
        }
    }

    fn imports() -> IndexMap<String, ImportSpec> {
        let mut map = IndexMap::new();
        map.insert(
            "provider".to_string(),
            ImportSpec::from([("pkg-a", "*"), ("pkg-b", "*")]),
        );
        map
    }

    #[test]
    fn index_uses_depth_two_and_exports_depth_three() {
        let recorder = Arc::new(DepthRecorder {
            depths: Mutex::new(Vec::new()),
        });
        let assembler = ExternalsAssembler::new(recorder.clone());

        assembler.for_index(&imports()).unwrap();
        assembler.for_export(&imports(), "pkg-a").unwrap();

        assert_eq!(*recorder.depths.lock().unwrap(), [INDEX_DEPTH, EXPORT_DEPTH]);
    }

    #[test]
    fn export_entry_never_externalizes_itself() {
        let assembler = ExternalsAssembler::new(Arc::new(ImportMapExternals));

        let externals = assembler.for_export(&imports(), "pkg-a").unwrap();
        assert!(!externals.contains_key("pkg-a"));
        assert!(externals.contains_key("pkg-b"));
    }

    #[test]
    fn index_keeps_all_imported_packages() {
        let assembler = ExternalsAssembler::new(Arc::new(ImportMapExternals));

        let externals = assembler.for_index(&imports()).unwrap();
        assert_eq!(externals.get("pkg-a").unwrap(), "module pkg-a");
        assert_eq!(externals.get("pkg-b").unwrap(), "module pkg-b");
    }

    #[test]
    fn provider_failure_propagates_unchanged() {
        struct Failing;
        impl ExternalsProvider for Failing {
            fn assemble(
                &self,
                _imports: &IndexMap<String, ImportSpec>,
                _depth: u8,
            ) -> Result<IndexMap<String, String>> {
                Err(Error::Externals("manifest unreadable".into()))
            }
        }

        let assembler = ExternalsAssembler::new(Arc::new(Failing));
        let err = assembler.for_index(&imports()).unwrap_err();
        assert!(matches!(err, Error::Externals(_)));
    }
}
