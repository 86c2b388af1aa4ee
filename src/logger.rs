//! Logging setup

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise both the library and the named
/// binary log at `default_level`.
pub fn setup_logger(binary_name: &str, default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                default_level,
                binary_name,
                default_level
            ))
        }))
        .init();
}
