//! Request/response types for the incident API.

use serde::Serialize;

use incident_model::ValidationErrors;

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
  pub error: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<ValidationErrors>,
}

impl ErrorBody {
  pub fn new(error: impl Into<String>) -> Self {
    Self {
      error: error.into(),
      details: None,
    }
  }

  pub fn with_details(mut self, details: ValidationErrors) -> Self {
    self.details = Some(details);
    self
  }
}

/// Confirmation returned by a successful delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
  pub message: String,
}

impl DeletedResponse {
  pub fn new() -> Self {
    Self {
      message: "Incident deleted successfully".into(),
    }
  }
}

impl Default for DeletedResponse {
  fn default() -> Self {
    Self::new()
  }
}
