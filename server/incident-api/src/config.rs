//! Server configuration: CLI flags with environment fallbacks.

use clap::{Args, Parser, ValueEnum};

use incident_model::ListConfig;

#[derive(Debug, Parser)]
#[command(name = "incident-api", about = "Incident Tracker JSON API", long_about = None)]
pub struct Config {
  #[command(flatten)]
  pub server: ServerConfig,

  #[command(flatten)]
  pub database: DatabaseConfig,

  #[command(flatten)]
  pub logging: LoggingConfig,

  /// Largest page size a list request may ask for
  #[arg(long, env = "MAX_PAGE_LIMIT", default_value_t = 100)]
  pub max_page_limit: u64,
}

#[derive(Debug, Args)]
pub struct ServerConfig {
  /// Server host address
  #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "127.0.0.1")]
  pub host: String,

  /// Server port
  #[arg(short, long, env = "PORT", default_value_t = 5005)]
  pub port: u16,
}

#[derive(Debug, Args)]
pub struct DatabaseConfig {
  /// PostgreSQL connection string; incidents are kept in memory when unset
  #[arg(long = "database-url", env = "DATABASE_URL")]
  pub url: Option<String>,

  /// Connection pool size
  #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
  pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
  Compact,
  Json,
}

#[derive(Debug, Args)]
pub struct LoggingConfig {
  /// Default filter when RUST_LOG is unset
  #[arg(long, env = "LOG_LEVEL", default_value = "info")]
  pub log_level: String,

  #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
  pub log_format: LogFormat,
}

impl Config {
  /// Parse flags and environment, loading `.env` first when present.
  pub fn load() -> Result<Self, clap::Error> {
    _ = dotenvy::dotenv();
    Self::try_parse()
  }

  pub fn socket_addr(&self) -> String {
    format!("{}:{}", self.server.host, self.server.port)
  }

  pub fn list_config(&self) -> ListConfig {
    ListConfig::with_max_limit(self.max_page_limit)
  }
}
