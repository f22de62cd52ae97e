use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

/// Directives for a configured level; noisy dependencies stay at `warn`.
fn default_directives(level: &str) -> String {
    format!("{level},sqlx=warn,sea_orm_migration=warn,hyper=warn")
}

fn build_filter(cfg: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    // RUST_LOG wins over the configured level.
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_directives(&cfg.level))
        .with_context(|| format!("invalid logging.level: {}", cfg.level))
}

/// Install the global subscriber. Log lines go to stderr so stdout stays
/// clean for `check` and `--print-config`.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(cfg)?;
    let registry = tracing_subscriber::registry().with(filter);

    match cfg.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
    .context("failed to initialize logging")
}
