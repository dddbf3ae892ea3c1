//! CLI error types.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// Config file doesn't exist at the expected location.
    #[error("config file not found: {}", .0.display())]
    #[diagnostic(
        code("CONFIG_NOT_FOUND"),
        help("Create a gangway.config.json file or specify --config <path>.")
    )]
    ConfigNotFound(PathBuf),

    /// Config file failed to parse or validate.
    #[error("invalid configuration: {0}")]
    #[diagnostic(
        code("INVALID_CONFIG"),
        help("Check gangway.config.json syntax and field types.")
    )]
    InvalidConfig(String),

    /// Error from the core bundler; diagnostics forwarded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Bundler(#[from] gangway_bundler::Error),

    /// I/O errors from file system operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
