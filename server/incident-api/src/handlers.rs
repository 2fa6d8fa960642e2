//! HTTP handlers for the incident API.

use std::sync::Arc;

use axum::{
  extract::{
    rejection::{JsonRejection, QueryRejection},
    Path, Query, State,
  },
  http::StatusCode,
  Json,
};

use incident_model::{Incident, IncidentFields, IncidentId, IncidentPage, ListParams};

use crate::error::{ApiError, Operation};
use crate::service::ServiceError;
use crate::state::AppState;
use crate::types::DeletedResponse;

pub async fn health() -> &'static str {
  "ok"
}

pub async fn list_incidents(
  State(state): State<Arc<AppState>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<IncidentPage>, ApiError> {
  let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;

  let page = state
    .incidents
    .list(&params)
    .await
    .map_err(ApiError::during(Operation::List))?;
  Ok(Json(page))
}

pub async fn create_incident(
  State(state): State<Arc<AppState>>,
  body: Result<Json<IncidentFields>, JsonRejection>,
) -> Result<(StatusCode, Json<Incident>), ApiError> {
  let Json(fields) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

  let incident = state
    .incidents
    .create(fields)
    .await
    .map_err(ApiError::during(Operation::Create))?;
  Ok((StatusCode::CREATED, Json(incident)))
}

pub async fn get_incident(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Incident>, ApiError> {
  let incident = state
    .incidents
    .get_by_id(&id)
    .await
    .map_err(ApiError::during(Operation::Get))?;
  Ok(Json(incident))
}

pub async fn update_incident(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  body: Result<Json<IncidentFields>, JsonRejection>,
) -> Result<Json<Incident>, ApiError> {
  // A malformed id outranks a malformed body.
  IncidentId::parse(&id)
    .map_err(ServiceError::from)
    .map_err(ApiError::during(Operation::Update))?;
  let Json(fields) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

  let incident = state
    .incidents
    .update(&id, fields)
    .await
    .map_err(ApiError::during(Operation::Update))?;
  Ok(Json(incident))
}

pub async fn delete_incident(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
  state
    .incidents
    .delete(&id)
    .await
    .map_err(ApiError::during(Operation::Delete))?;
  Ok(Json(DeletedResponse::new()))
}
