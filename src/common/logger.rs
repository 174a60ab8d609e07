//! Logging setup for the chat binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for a binary.
///
/// Events from the library crate and from the binary itself are emitted at
/// `default_log_level`; the `RUST_LOG` environment variable overrides the
/// whole filter.
///
/// # Examples
///
/// ```no_run
/// use petchat::common::logger;
///
/// logger::init("server", "info");
/// ```
pub fn init(binary_name: &str, default_log_level: &str) {
    let default_directives = format!(
        "{}={},{}={}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        default_log_level,
        binary_name,
        default_log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
