//! Logging infrastructure for the Gangway CLI.
//!
//! Structured logging via the `tracing` ecosystem with verbosity flags
//! and `RUST_LOG` overrides.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program, before any logging occurs.
/// `verbose` wins over `quiet`; without either, `RUST_LOG` applies, then
/// an info-level default.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("gangway_bundler=debug,gangway_cli=debug")
    } else if quiet {
        EnvFilter::new("gangway_bundler=error,gangway_cli=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gangway_bundler=info,gangway_cli=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
