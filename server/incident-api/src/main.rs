//! Binary entrypoint for the incident API.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use incident_api::config::Config;
use incident_api::store::{IncidentStore, MemoryIncidentStore, PgIncidentStore};
use incident_api::{logging, shutdown, AppState, IncidentService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let config = Config::load().unwrap_or_else(|e| e.exit());
  logging::init(&config.logging)?;

  let store: Arc<dyn IncidentStore> = match &config.database.url {
    Some(url) => {
      let store = PgIncidentStore::connect(url, config.database.max_connections).await?;
      store.ensure_schema().await?;
      Arc::new(store)
    }
    None => {
      warn!("DATABASE_URL not set; incidents are kept in memory and lost on exit");
      Arc::new(MemoryIncidentStore::new())
    }
  };

  let state = Arc::new(AppState {
    incidents: IncidentService::new(store, config.list_config()),
  });

  let addr: SocketAddr = config.socket_addr().parse()?;
  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!("incident-api listening on http://{}", addr);

  axum::serve(listener, incident_api::app(state))
    .with_graceful_shutdown(shutdown::signal())
    .await?;

  info!("incident-api stopped");
  Ok(())
}
