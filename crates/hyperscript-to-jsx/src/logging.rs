//! Tracing setup.
//!
//! ```bash
//! HYPERSCRIPT_TO_JSX_LOG=debug hyperscript-to-jsx src/
//! HYPERSCRIPT_TO_JSX_LOG="hyperscript_jsx=trace" hyperscript-to-jsx view.js
//! ```
//!
//! The subscriber is only installed when `HYPERSCRIPT_TO_JSX_LOG` (or
//! `RUST_LOG`) is set.

use tracing_subscriber::EnvFilter;

/// The environment variable holding the log filter.
pub const LOG_ENV: &str = "HYPERSCRIPT_TO_JSX_LOG";

/// Build an `EnvFilter` from `HYPERSCRIPT_TO_JSX_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Initialise the global tracing subscriber.
///
/// Output goes to stderr; stdout carries the transformed code or the JSON
/// report.
pub fn init_tracing() {
    if std::env::var_os(LOG_ENV).is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
