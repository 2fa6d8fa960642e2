//! Incident Tracker API
//!
//! HTTP service exposing incident records: paginated and sortable listing,
//! create, get, partial update, delete. Identifier format and field rules are
//! checked before any storage access.
//! Bind to 127.0.0.1 by default.

pub mod config;
mod date;
pub mod error;
mod handlers;
pub mod logging;
pub mod service;
pub mod shutdown;
mod state;
pub mod store;
pub mod types;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use handlers::{
  create_incident, delete_incident, get_incident, health, list_incidents, update_incident,
};
pub use service::{IncidentService, ServiceError};
pub use state::AppState;

/// Full route table with CORS and request tracing.
pub fn app(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/incidents", get(list_incidents).post(create_incident))
    .route(
      "/incidents/:id",
      get(get_incident).put(update_incident).delete(delete_incident),
    )
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
