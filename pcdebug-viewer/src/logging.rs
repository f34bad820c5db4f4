//! Console logging
//!
//! Level defaults to info with debug for our own crates, overridable with RUST_LOG.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,pcdebug=debug,pcdebug_viewer=debug,pcdebug_io=debug";

/// Initialize the logging system; call once at startup
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    // A second call (tests, embedding) keeps the first subscriber
    if tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }
}
