//! Logging setup for the relay binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the shared crate, the crate that owns the binary and the
/// binary itself. `RUST_LOG` overrides it entirely when set.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "relay-server", "relay-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn")
///
/// # Examples
///
/// ```no_run
/// use relay_shared::logger::setup_logger;
///
/// setup_logger("relay-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let target = binary_name.replace('-', "_");
    format!(
        "{}={level},{}={level},tower_http={level}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        target,
        level = default_log_level
    )
}
