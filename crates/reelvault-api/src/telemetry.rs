//! Tracing subscriber setup.

use reelvault_core::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise info for our crates, warn for the
/// rest. Production gets JSON lines, everything else human-readable output.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,reelvault_api=info,reelvault_db=info,reelvault_storage=info,reelvault_processing=info")
    });

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
