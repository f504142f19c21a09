//! Logging and tracing configuration
//!
//! Every HTTP exchange is logged at INFO (method, URL, status). Request and
//! response dumps are emitted at DEBUG and only show up with
//! `RUST_LOG=ado_results=debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "ado_results=info,warn";

/// Initialize tracing for the CLI (stderr logging)
///
/// Logs go to stderr so the success summary on stdout stays clean.
pub fn init_cli() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_names(true)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
