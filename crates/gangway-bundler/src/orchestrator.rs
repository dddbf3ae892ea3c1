//! Sequential build orchestration.
//!
//! The orchestrator drives the backend through the generated configs:
//! index bundle first (when a main entry exists), then each export bundle
//! strictly in declaration order. Builds are sequential by design; that
//! keeps backend resource usage bounded and diagnostics attributable to a
//! single entry. The first failure aborts the remaining sequence.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{BuildConfig, BuildMode, TranspileOptions};
use crate::config_builder::{BuildEntry, ConfigBuilder};
use crate::engine::BundleEngine;
use crate::externals::{ExternalsAssembler, ExternalsProvider};
use crate::introspect::SymbolIntrospector;
use crate::resolver::ExportDescriptorResolver;
use crate::scratch::ScratchDir;
use crate::Result;

pub struct BuildOrchestrator {
    engine: Arc<dyn BundleEngine>,
    introspector: Arc<dyn SymbolIntrospector>,
    externals: Arc<dyn ExternalsProvider>,
    scratch: ScratchDir,
}

impl BuildOrchestrator {
    pub fn new(
        engine: Arc<dyn BundleEngine>,
        introspector: Arc<dyn SymbolIntrospector>,
        externals: Arc<dyn ExternalsProvider>,
        scratch: ScratchDir,
    ) -> Self {
        Self {
            engine,
            introspector,
            externals,
            scratch,
        }
    }

    /// Run the whole bundling sequence, returning elapsed wall-clock time.
    pub async fn run(
        &self,
        project_dir: impl AsRef<Path>,
        build: &BuildConfig,
        transpile: &TranspileOptions,
        mode: BuildMode,
    ) -> Result<Duration> {
        let start = Instant::now();

        let assembler = ExternalsAssembler::new(self.externals.clone());
        let resolver =
            ExportDescriptorResolver::new(self.introspector.clone(), self.scratch.clone());
        let builder = ConfigBuilder::new(
            project_dir.as_ref(),
            build,
            mode,
            &assembler,
            &resolver,
        );

        if let Some(entry) = builder.index_config(transpile)? {
            // The index config is always persisted for inspection.
            self.persist_config("gangway.index.config.json", &entry)?;
            tracing::info!(entry = %entry.key, "building index bundle");
            self.engine.bundle(&entry, build.report).await?;
        }

        let export_entries = builder.export_configs()?;

        for (i, entry) in export_entries.iter().enumerate() {
            if build.report {
                let name = format!("gangway.export[{i}].{}.config.json", entry.flat_name);
                self.persist_config(&name, entry)?;
            }
            tracing::info!(entry = %entry.key, "building export bundle");
            self.engine.bundle(entry, build.report).await?;
        }

        let elapsed = start.elapsed();
        tracing::info!("ESM bundling took {}s", elapsed.as_secs());
        Ok(elapsed)
    }

    fn persist_config(&self, name: &str, entry: &BuildEntry) -> Result<()> {
        self.scratch.persist(name, &entry.config.to_json_pretty()?)?;
        Ok(())
    }
}
