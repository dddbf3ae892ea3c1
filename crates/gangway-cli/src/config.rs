//! Config file loading.
//!
//! `gangway.config.json` carries the build configuration plus optional
//! transpile presets for the index entry. Environment variables prefixed
//! with `GANGWAY_` override file values.

use figment::providers::{Env, Format as _, Json};
use figment::Figment;
use gangway_bundler::{BuildConfig, TranspileOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub build: BuildConfig,

    /// Transpile options for the index entry.
    #[serde(default)]
    pub transpile: TranspileOptions,
}

impl CliConfig {
    /// Load configuration for a project.
    /// Priority: environment variables > config file.
    pub fn load(project_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let path: PathBuf = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_dir.join("gangway.config.json"));

        if !path.exists() {
            return Err(CliError::ConfigNotFound(path));
        }

        Figment::from(Json::file(path))
            .merge(Env::prefixed("GANGWAY_"))
            .extract()
            .map_err(|err| CliError::InvalidConfig(err.to_string()))
    }
}
