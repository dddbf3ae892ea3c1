//! Shared scaffolding for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use gangway_bundler::{
    BuildEntry, BundleEngine, Error, Result, SymbolIntrospector, SymbolSurface,
};

/// Engine that records every invocation instead of bundling.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<(String, bool)>>,
    pub fail_on: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_on(key: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(key.into()),
        })
    }

    pub fn keys(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[async_trait]
impl BundleEngine for RecordingEngine {
    async fn bundle(&self, entry: &BuildEntry, report: bool) -> Result<()> {
        self.calls.lock().unwrap().push((entry.key.clone(), report));
        if self.fail_on.as_deref() == Some(entry.key.as_str()) {
            return Err(Error::Engine {
                entry: entry.key.clone(),
                message: "simulated backend failure".into(),
            });
        }
        Ok(())
    }
}

/// Introspector that answers from a fixed surface for every package.
pub struct StubIntrospector {
    pub surface: SymbolSurface,
}

impl StubIntrospector {
    pub fn new(names: &[&str], es_module: bool) -> Arc<Self> {
        Arc::new(Self {
            surface: SymbolSurface::declared(names.iter().copied(), es_module),
        })
    }
}

impl SymbolIntrospector for StubIntrospector {
    fn introspect(&self, _pkg_name: &str) -> Result<SymbolSurface> {
        Ok(self.surface.clone())
    }
}

/// Introspector for which every package is unloadable.
pub struct UnloadableIntrospector;

impl SymbolIntrospector for UnloadableIntrospector {
    fn introspect(&self, pkg_name: &str) -> Result<SymbolSurface> {
        Err(Error::SymbolResolution {
            package: pkg_name.to_string(),
            message: "cannot find module".into(),
        })
    }
}
