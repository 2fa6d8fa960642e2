//! Structured error types for incident rules.

use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
  #[error("validation failed: {}", summarize(.0))]
  Validation(ValidationErrors),

  #[error("customer name and description are required")]
  MissingFields,

  #[error("invalid incident id: {0:?}")]
  InvalidIdentifier(String),
}

impl ModelError {
  /// Single-field validation failure.
  pub fn validation(field: &str, reason: &str) -> Self {
    let mut errors = ValidationErrors::new();
    errors.insert(field.to_string(), reason.to_string());
    Self::Validation(errors)
  }

  pub fn invalid_identifier(raw: impl Into<String>) -> Self {
    Self::InvalidIdentifier(raw.into())
  }
}

fn summarize(errors: &ValidationErrors) -> String {
  errors
    .iter()
    .map(|(field, reason)| format!("{}: {}", field, reason))
    .collect::<Vec<_>>()
    .join("; ")
}
