//! Log subscriber setup.
//!
//! `POLYNAP_LOG` wins over the configured level. Output goes to stderr so
//! JSON written to stdout stays parseable.

use tracing_subscriber::EnvFilter;

pub fn init(configured_level: &str) {
    let filter = EnvFilter::try_from_env("POLYNAP_LOG")
        .or_else(|_| EnvFilter::try_new(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
