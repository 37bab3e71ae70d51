//! Tracing subscriber setup for the faro CLI.
//!
//! Log lines go to stderr so reports printed to stdout stay clean.

use clap::ValueEnum;
use tracing_subscriber::{EnvFilter, prelude::*};

/// HTTP and TLS internals filtered to `warn`.
const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// `RUST_LOG` wins; otherwise `level` with noisy modules quieted.
fn build_filter(level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = String::from(level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{module}=warn"));
    }
    EnvFilter::new(directives)
}

/// Install the global subscriber. Later calls are no-ops.
pub(crate) fn init(level: &str, format: LogFormat) {
    let subscriber = tracing_subscriber::registry().with(build_filter(level));

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(std::io::stderr);
            let _ = subscriber.with(layer).try_init();
        }
        LogFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_target(false)
                .with_writer(std::io::stderr);
            let _ = subscriber.with(layer).try_init();
        }
    }

    tracing::debug!(log_level = level, ?format, "logging initialized");
}
