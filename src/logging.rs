//! Tracing subscriber setup for binaries

use tracing_subscriber::{fmt, EnvFilter};

const CRATES: [&str; 4] = ["demandcast", "demand_report", "demand_forecast", "demand_alerts"];

/// Default filter directive: `level` for every workspace crate
pub fn default_directive(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is harmless.
pub fn init_tracing(level: &str, json: bool) {
    let directive = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default_directive(level));
    let filter = EnvFilter::new(directive);

    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
