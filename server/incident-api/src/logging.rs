//! Tracing subscriber initialisation.

use tracing_subscriber::{
  fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    EnvFilter::new(format!(
      "{},hyper=warn,sqlx=warn,tower_http=info",
      config.log_level
    ))
  })
}

/// `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
  let registry = tracing_subscriber::registry().with(build_env_filter(config));

  match config.log_format {
    LogFormat::Compact => registry
      .with(fmt::layer().compact().with_target(true))
      .try_init(),
    LogFormat::Json => registry
      .with(
        fmt::layer()
          .json()
          .with_current_span(true)
          .with_span_list(true)
          .with_target(true),
      )
      .try_init(),
  }
}
