//! # gangway-bundler
//!
//! Gangway drives a generic bundling backend to produce ECMAScript-module
//! output for packages that mix CommonJS and ESM/TypeScript/JSX sources.
//!
//! For each build it synthesizes one bundle for the package's main entry
//! point and one bundle per declared public re-export. Re-exported packages
//! that need CommonJS/ESM interop get a synthetic "bridge module" generated
//! on the fly; everything else is externalized so the runtime module system
//! resolves it.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use gangway_bundler::{
//!     BuildConfig, BuildMode, BuildOrchestrator, ExportItem, ImportMapExternals,
//!     NodeIntrospector, ProcessEngine, ScratchDir, TranspileOptions,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig::new("build/esm")
//!     .main("src/index.ts")
//!     .export(ExportItem::new("classnames").auto_symbols())
//!     .report(true);
//!
//! let orchestrator = BuildOrchestrator::new(
//!     Arc::new(ProcessEngine::new("webpack")),
//!     Arc::new(NodeIntrospector::new(".")),
//!     Arc::new(ImportMapExternals),
//!     ScratchDir::new("build/esm/.gangway")?,
//! );
//!
//! let elapsed = orchestrator
//!     .run(".", &config, &TranspileOptions::default(), BuildMode::from_env())
//!     .await?;
//! println!("done in {}s", elapsed.as_secs());
//! # Ok(()) }
//! ```
//!
//! Library users install their own `tracing` subscriber; application
//! developers can enable the `logging` feature for a ready-made one.

pub mod bridge;
pub mod config;
pub mod config_builder;
pub mod engine;
pub mod externals;
pub mod generated;
pub mod introspect;
pub mod orchestrator;
pub mod resolver;
pub mod scratch;

#[cfg(feature = "logging")]
pub mod logging;

pub use bridge::BridgeSource;
pub use config::{
    BuildConfig, BuildMode, ExportItem, ImportSpec, ModuleFormat, SymbolSpec, TranspileOptions,
};
pub use config_builder::{BuildEntry, ConfigBuilder};
pub use engine::{BundleEngine, ProcessEngine};
pub use externals::{ExternalsAssembler, ExternalsProvider, ImportMapExternals};
pub use generated::GeneratedBuildConfig;
pub use introspect::{NodeIntrospector, SymbolIntrospector, SymbolSurface};
pub use orchestrator::BuildOrchestrator;
pub use resolver::{flatten_pkg_name, EntryImport, ExportDescriptorResolver, ResolvedExport};
pub use scratch::ScratchDir;

#[cfg(feature = "logging")]
pub use logging::{init_logging, init_logging_from_env, LogLevel};

/// Error types for gangway-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Symbol introspection of a re-exported package failed.
    ///
    /// This is fatal for the whole run: without the symbol surface no
    /// correct bridge module can be synthesized.
    #[error("unable to resolve exported symbols of '{package}': {message}")]
    SymbolResolution { package: String, message: String },

    /// A declared export symbol is not a valid ECMAScript identifier.
    #[error("export '{package}' declares invalid symbol '{symbol}'")]
    InvalidSymbol { package: String, symbol: String },

    /// The backend bundling engine reported a failure for one entry.
    #[error("backend build failed for entry '{entry}': {message}")]
    Engine { entry: String, message: String },

    /// The externals collaborator failed; propagated unchanged.
    #[error("externals assembly failed: {0}")]
    Externals(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gangway-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::SymbolResolution { .. } => "SYMBOL_RESOLUTION",
            Error::InvalidSymbol { .. } => "INVALID_SYMBOL",
            Error::Engine { .. } => "BACKEND_BUILD",
            Error::Externals(_) => "EXTERNALS_ASSEMBLY",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::SymbolResolution { package, .. } => Some(Box::new(format!(
                "Unable to load '{}' for symbol introspection.\nConsider declaring the exported symbols explicitly in your gangway.config.json instead of using \"auto\".",
                package
            ))),
            Error::InvalidSymbol { symbol, .. } => Some(Box::new(format!(
                "'{}' cannot be used as an ECMAScript binding name.\nCheck the symbol list declared for this export.",
                symbol
            ))),
            Error::Engine { entry, .. } => Some(Box::new(format!(
                "The backend bundler failed while building '{}'.\nRe-run with --report to persist the generated config for inspection.",
                entry
            ))),
            _ => None,
        }
    }
}
