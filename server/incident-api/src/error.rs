//! Mapping from service outcomes to HTTP responses.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::error;

use incident_model::ModelError;

use crate::service::ServiceError;
use crate::types::ErrorBody;

/// Which endpoint failed; picks the generic message for server errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  List,
  Create,
  Get,
  Update,
  Delete,
}

impl Operation {
  pub fn failure_message(self) -> &'static str {
    match self {
      Self::List => "Failed to fetch incidents",
      Self::Create => "Failed to create incident",
      Self::Get => "Failed to fetch incident",
      Self::Update => "Failed to update incident",
      Self::Delete => "Failed to delete incident",
    }
  }
}

#[derive(Debug)]
pub enum ApiError {
  /// The service rejected or failed the operation.
  Service {
    op: Operation,
    source: ServiceError,
  },
  /// The request could not be decoded (body or query string).
  BadRequest(String),
}

impl ApiError {
  /// `map_err` adapter tagging a service error with its operation.
  pub fn during(op: Operation) -> impl FnOnce(ServiceError) -> Self {
    move |source| Self::Service { op, source }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::BadRequest(message.into())
  }

  fn status_and_body(self) -> (StatusCode, ErrorBody) {
    let (op, source) = match self {
      Self::BadRequest(message) => return (StatusCode::BAD_REQUEST, ErrorBody::new(message)),
      Self::Service { op, source } => (op, source),
    };

    match source {
      ServiceError::Model(ModelError::Validation(details)) => (
        StatusCode::BAD_REQUEST,
        ErrorBody::new("Validation failed").with_details(details),
      ),
      ServiceError::Model(ModelError::MissingFields) => (
        StatusCode::BAD_REQUEST,
        ErrorBody::new("Customer name and description are required"),
      ),
      ServiceError::Model(ModelError::InvalidIdentifier(_)) => (
        StatusCode::BAD_REQUEST,
        ErrorBody::new("Invalid incident ID format"),
      ),
      ServiceError::NotFound => (StatusCode::NOT_FOUND, ErrorBody::new("Incident not found")),
      ServiceError::Persistence(e) => {
        error!(operation = ?op, error = ?e, "storage failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          ErrorBody::new(op.failure_message()),
        )
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = self.status_and_body();
    (status, Json(body)).into_response()
  }
}
