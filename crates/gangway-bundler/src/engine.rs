//! Backend bundle engine boundary.
//!
//! The actual bundling/minification tool is opaque to this crate: it
//! consumes one generated config and either succeeds or fails. The
//! shipped [`ProcessEngine`] drives a child process; tests substitute
//! recording implementations.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

use crate::config_builder::BuildEntry;
use crate::{Error, Result};

/// Backend build collaborator.
#[async_trait]
pub trait BundleEngine: Send + Sync {
    /// Bundle one entry. A failure aborts the remaining sequence.
    async fn bundle(&self, entry: &BuildEntry, report: bool) -> Result<()>;
}

/// Engine that spawns a backend command with the serialized config path.
///
/// Invocation shape: `<command> --config <path> [--report]`. The config
/// file is written under `config_dir` (the system temp directory by
/// default) and left in place afterwards.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    command: String,
    config_dir: PathBuf,
}

impl ProcessEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            config_dir: std::env::temp_dir(),
        }
    }

    /// Directory the per-entry config files are written to.
    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    fn engine_error(&self, entry: &BuildEntry, message: impl Into<String>) -> Error {
        Error::Engine {
            entry: entry.key.clone(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl BundleEngine for ProcessEngine {
    async fn bundle(&self, entry: &BuildEntry, report: bool) -> Result<()> {
        tokio::fs::create_dir_all(&self.config_dir).await?;
        let config_path = self
            .config_dir
            .join(format!("{}.config.json", entry.flat_name));
        tokio::fs::write(&config_path, entry.config.to_json_pretty()?).await?;

        let mut command = Command::new(&self.command);
        command.arg("--config").arg(&config_path);
        if report {
            command.arg("--report");
        }

        tracing::debug!(entry = %entry.key, command = %self.command, "invoking backend");

        let status = command
            .status()
            .await
            .map_err(|err| self.engine_error(entry, err.to_string()))?;

        if !status.success() {
            return Err(self.engine_error(entry, format!("backend exited with {status}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generated::{
        EntryDescriptor, Experiments, GeneratedBuildConfig, MinimizerOptions, ModuleSection,
        Optimization, OutputEnvironment, OutputLibrary, OutputSection, ResolveFallback,
        ResolveSection,
    };
    use indexmap::IndexMap;
    use tempfile::TempDir;

    fn entry(key: &str) -> BuildEntry {
        let mut map = IndexMap::new();
        map.insert(
            key.to_string(),
            EntryDescriptor {
                import: "some-pkg".into(),
            },
        );
        BuildEntry {
            key: key.to_string(),
            flat_name: "some-pkg".into(),
            config: GeneratedBuildConfig {
                entry: map,
                experiments: Experiments {
                    output_module: true,
                },
                externals: IndexMap::new(),
                externals_type: "module".into(),
                module: ModuleSection { rules: vec![] },
                optimization: Optimization {
                    minimize: true,
                    minimizer: MinimizerOptions {
                        keep_classnames: true,
                        keep_fnames: true,
                    },
                },
                output: OutputSection {
                    environment: OutputEnvironment {
                        dynamic_import: true,
                        module: true,
                    },
                    filename: "[name].js".into(),
                    library: OutputLibrary {
                        kind: "module".into(),
                    },
                    path: "build/esm".into(),
                },
                resolve: ResolveSection {
                    extensions: vec![],
                    fallback: ResolveFallback { path: false },
                },
                devtool: None,
                mode: "production".into(),
            },
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn writes_the_config_and_runs_the_backend() {
        let dir = TempDir::new().expect("temp dir");
        let engine = ProcessEngine::new("true").config_dir(dir.path().join("configs"));

        engine
            .bundle(&entry("__gangway__/exports/some-pkg"), false)
            .await
            .expect("bundle");

        let config_path = dir.path().join("configs/some-pkg.config.json");
        let contents = std::fs::read_to_string(config_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["externalsType"], "module");
    }

    #[tokio::test]
    async fn missing_backend_is_an_engine_error() {
        let dir = TempDir::new().expect("temp dir");
        let engine =
            ProcessEngine::new("gangway-test-no-such-binary").config_dir(dir.path().to_path_buf());

        let err = engine
            .bundle(&entry("__gangway__/index"), false)
            .await
            .unwrap_err();
        match err {
            Error::Engine { entry, .. } => assert_eq!(entry, "__gangway__/index"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
