//! Integration tests for the incident model's JSON contracts.

use incident_model::validation;
use incident_model::{
  Incident, IncidentFields, IncidentId, IncidentPatch, ListConfig, ListParams, ModelError,
  NewIncident, Priority, Status,
};

fn fixture_fields() -> IncidentFields {
  let json = r#"{
    "customerName": "Acme Co",
    "description": "Server is down in region X"
  }"#;
  serde_json::from_str(json).unwrap()
}

#[test]
fn create_payload_gets_enum_defaults() {
  let new = NewIncident::from_fields(fixture_fields()).unwrap();
  assert_eq!(new.priority, Priority::Medium);
  assert_eq!(new.status, Status::Open);
}

#[test]
fn incident_serializes_with_camel_case_keys() {
  let new = NewIncident::from_fields(fixture_fields()).unwrap();
  let mut incident = Incident::create(IncidentId::new(), new, chrono::Utc::now());
  incident.status = Status::InProgress;

  let value = serde_json::to_value(&incident).unwrap();
  for key in [
    "id",
    "customerName",
    "description",
    "priority",
    "status",
    "createdAt",
    "updatedAt",
  ] {
    assert!(value.get(key).is_some(), "missing key {}", key);
  }
  assert_eq!(value["status"], "in-progress");
  assert_eq!(value["priority"], "medium");
  assert_eq!(value["id"], incident.id.to_string());

  let back: Incident = serde_json::from_value(value).unwrap();
  assert_eq!(back, incident);
}

#[test]
fn unknown_and_immutable_fields_are_ignored() {
  let json = r#"{
    "id": "should-not-matter",
    "createdAt": "1999-01-01T00:00:00Z",
    "status": "resolved",
    "another": 42
  }"#;
  let fields: IncidentFields = serde_json::from_str(json).unwrap();
  let patch = IncidentPatch::from_fields(fields).unwrap();
  assert_eq!(patch.status, Some(Status::Resolved));
  assert!(patch.customer_name.is_none());
  assert!(patch.description.is_none());
}

#[test]
fn partial_update_reports_only_supplied_fields() {
  let json = r#"{ "description": "too short" }"#;
  let fields: IncidentFields = serde_json::from_str(json).unwrap();
  let errors = validation::validate(&fields);
  assert_eq!(errors.len(), 1);
  assert!(errors.contains_key("description"));

  match IncidentPatch::from_fields(fields).unwrap_err() {
    ModelError::Validation(errors) => assert!(errors.contains_key("description")),
    other => panic!("unexpected error: {other:?}"),
  }
}

#[test]
fn list_params_parse_from_query_json_shape() {
  let json = r#"{ "page": "2", "limit": "25", "sortField": "status", "sortOrder": "asc" }"#;
  let params: ListParams = serde_json::from_str(json).unwrap();
  let query = params.resolve(&ListConfig::default()).unwrap();
  assert_eq!(query.page, 2);
  assert_eq!(query.limit, 25);
  assert_eq!(query.skip(), 25);
}
