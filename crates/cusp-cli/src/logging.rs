use anyhow::Result;
use cusp_core::CuspConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize the tracing subscriber. `RUST_LOG` wins over the configured filter.
pub fn init(config: &CuspConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    // stdout carries command output
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "cusp starting");
    Ok(())
}
