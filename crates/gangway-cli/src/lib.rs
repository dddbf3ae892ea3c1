//! Gangway CLI library.
//!
//! The binary in `main.rs` is a thin wrapper around these modules so the
//! argument parsing and config loading stay unit-testable.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;

pub use error::{CliError, Result};
