//! Shared handler state.

use crate::service::IncidentService;

pub struct AppState {
  pub incidents: IncidentService,
}
