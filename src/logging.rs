use crate::config::LogFormat;
use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` level.
pub fn setup_logging(format: LogFormat) -> Result<(), anyhow::Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stdout)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_writer(std::io::stdout).boxed(),
    };

    let subscriber = Registry::default().with(env_filter).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global default subscriber")?;

    Ok(())
}
