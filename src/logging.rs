//! Tracing subscriber setup for binaries.
//!
//! Environment variables:
//! - `RUST_LOG`: log filter (default: `warn`)
//! - `PROCSIM_LOG_ANSI`: set to `0` to disable colored output

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a compact stderr subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let ansi = std::env::var("PROCSIM_LOG_ANSI")
        .map(|v| v != "0" && v != "false")
        .unwrap_or(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(ansi)
                .compact(),
        )
        .try_init();
}
