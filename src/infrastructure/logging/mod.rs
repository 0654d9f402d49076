// Logging module - Logging infrastructure
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the default filter directive for a configured level.
///
/// `RUST_LOG` still wins when set; this is only the fallback.
pub fn default_filter(level: &str) -> String {
    format!("shadecom={},warn,error", level)
}

/// Initialize logging system
pub fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .try_init()?;

    tracing::debug!("ShadeCom logging system initialized");
    Ok(())
}
