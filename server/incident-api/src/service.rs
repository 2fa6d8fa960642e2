//! Incident operations: identifier pre-checks and validation before storage,
//! then one store call per operation.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use incident_model::validation;
use incident_model::{
  Incident, IncidentFields, IncidentId, IncidentPage, IncidentPatch, ListConfig, ListParams,
  ModelError, NewIncident,
};

use crate::date;
use crate::store::{IncidentStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
  #[error(transparent)]
  Model(#[from] ModelError),

  #[error("incident not found")]
  NotFound,

  #[error("persistence: {0}")]
  Persistence(#[from] StoreError),
}

#[derive(Clone)]
pub struct IncidentService {
  store: Arc<dyn IncidentStore>,
  list_config: ListConfig,
}

impl IncidentService {
  pub fn new(store: Arc<dyn IncidentStore>, list_config: ListConfig) -> Self {
    Self { store, list_config }
  }

  /// Validate, assign id and timestamps, persist.
  pub async fn create(&self, fields: IncidentFields) -> Result<Incident, ServiceError> {
    let new = NewIncident::from_fields(fields)?;
    let incident = Incident::create(IncidentId::new(), new, date::now());

    let stored = self.store.insert(incident).await?;
    info!(id = %stored.id, "incident created");
    Ok(stored)
  }

  pub async fn get_by_id(&self, id: &str) -> Result<Incident, ServiceError> {
    let id = IncidentId::parse(id)?;
    self.store.find(id).await?.ok_or(ServiceError::NotFound)
  }

  /// One page plus the total record count, fetched concurrently.
  pub async fn list(&self, params: &ListParams) -> Result<IncidentPage, ServiceError> {
    let query = params.resolve(&self.list_config)?;

    let (incidents, total) =
      tokio::try_join!(self.store.find_page(query), self.store.count())?;

    Ok(IncidentPage {
      incidents,
      pagination: query.pagination(total),
    })
  }

  /// Merge the supplied fields into the stored record, re-validate the
  /// result, then persist only those fields plus a fresh `updatedAt`.
  pub async fn update(&self, id: &str, fields: IncidentFields) -> Result<Incident, ServiceError> {
    let id = IncidentId::parse(id)?;
    let patch = IncidentPatch::from_fields(fields)?;

    let mut merged = self.store.find(id).await?.ok_or(ServiceError::NotFound)?;
    merged.apply(&patch, date::now());
    validation::validate_incident(&merged)?;

    let updated = self
      .store
      .update(id, patch, merged.updated_at)
      .await?
      .ok_or(ServiceError::NotFound)?;
    info!(id = %updated.id, "incident updated");
    Ok(updated)
  }

  pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
    let id = IncidentId::parse(id)?;
    if !self.store.remove(id).await? {
      return Err(ServiceError::NotFound);
    }
    info!(%id, "incident deleted");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;
  use std::time::Duration;

  use super::*;
  use crate::store::{MemoryIncidentStore, MockIncidentStore};
  use incident_model::{Priority, Status};

  fn service() -> IncidentService {
    IncidentService::new(Arc::new(MemoryIncidentStore::new()), ListConfig::default())
  }

  fn fields(name: &str, description: &str) -> IncidentFields {
    IncidentFields {
      customer_name: Some(name.into()),
      description: Some(description.into()),
      ..Default::default()
    }
  }

  fn params(pairs: &[(&str, &str)]) -> ListParams {
    let mut p = ListParams::default();
    for (k, v) in pairs {
      let v = Some(v.to_string());
      match *k {
        "page" => p.page = v,
        "limit" => p.limit = v,
        "sortField" => p.sort_field = v,
        "sortOrder" => p.sort_order = v,
        _ => unreachable!(),
      }
    }
    p
  }

  #[tokio::test]
  async fn create_then_get_round_trips() {
    let svc = service();
    let created = svc
      .create(fields("Acme Co", "Server is down in region X"))
      .await
      .unwrap();

    let fetched = svc.get_by_id(&created.id.to_string()).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.customer_name, "Acme Co");
    assert_eq!(fetched.description, "Server is down in region X");
    assert_eq!(fetched.priority, Priority::Medium);
    assert_eq!(fetched.status, Status::Open);
    assert_eq!(fetched.created_at, fetched.updated_at);
  }

  #[tokio::test]
  async fn create_keeps_supplied_enums() {
    let mut f = fields("Acme Co", "Server is down in region X");
    f.priority = Some("high".into());
    f.status = Some("in-progress".into());
    let created = service().create(f).await.unwrap();
    assert_eq!(created.priority, Priority::High);
    assert_eq!(created.status, Status::InProgress);
  }

  #[tokio::test]
  async fn create_without_required_fields_never_touches_storage() {
    let mut store = MockIncidentStore::new();
    store.expect_insert().never();
    let svc = IncidentService::new(Arc::new(store), ListConfig::default());

    let err = svc
      .create(IncidentFields {
        customer_name: Some("Acme Co".into()),
        ..Default::default()
      })
      .await
      .unwrap_err();
    assert!(matches!(err, ServiceError::Model(ModelError::MissingFields)));
  }

  #[tokio::test]
  async fn malformed_id_is_rejected_before_lookup() {
    let mut store = MockIncidentStore::new();
    store.expect_find().never();
    store.expect_update().never();
    store.expect_remove().never();
    let svc = IncidentService::new(Arc::new(store), ListConfig::default());

    for result in [
      svc.get_by_id("not-a-valid-id").await.map(|_| ()),
      svc.update("not-a-valid-id", IncidentFields::default()).await.map(|_| ()),
      svc.delete("not-a-valid-id").await,
    ] {
      assert!(matches!(
        result,
        Err(ServiceError::Model(ModelError::InvalidIdentifier(_)))
      ));
    }
  }

  #[tokio::test]
  async fn delete_is_not_found_after_first_success() {
    let svc = service();
    let missing = IncidentId::new().to_string();
    assert!(matches!(svc.delete(&missing).await, Err(ServiceError::NotFound)));
    assert!(matches!(svc.delete(&missing).await, Err(ServiceError::NotFound)));

    let created = svc
      .create(fields("Acme Co", "Server is down in region X"))
      .await
      .unwrap();
    let id = created.id.to_string();
    svc.delete(&id).await.unwrap();
    assert!(matches!(svc.delete(&id).await, Err(ServiceError::NotFound)));
    assert!(matches!(svc.get_by_id(&id).await, Err(ServiceError::NotFound)));
  }

  #[tokio::test]
  async fn pages_partition_every_record_once() {
    let svc = service();
    let n = 25;
    for i in 0..n {
      svc
        .create(fields(&format!("Customer {:02}", i), "Server is down in region X"))
        .await
        .unwrap();
    }

    let first = svc.list(&params(&[("limit", "10")])).await.unwrap();
    assert_eq!(first.pagination.total, n);
    assert_eq!(first.pagination.total_pages, 3);

    let mut seen = HashSet::new();
    for page in 1..=first.pagination.total_pages {
      let result = svc
        .list(&params(&[("page", &page.to_string()), ("limit", "10")]))
        .await
        .unwrap();
      assert_eq!(result.pagination.page, page);
      for incident in result.incidents {
        assert!(seen.insert(incident.id), "duplicate {}", incident.id);
      }
    }
    assert_eq!(seen.len() as u64, n);
  }

  #[tokio::test]
  async fn list_sorts_by_customer_name_ascending() {
    let svc = service();
    for name in ["Zeta Ltd", "acme", "Beta Inc", "Acme Co"] {
      svc
        .create(fields(name, "Server is down in region X"))
        .await
        .unwrap();
    }

    let page = svc
      .list(&params(&[("sortField", "customerName"), ("sortOrder", "asc")]))
      .await
      .unwrap();
    let names: Vec<_> = page.incidents.iter().map(|i| i.customer_name.clone()).collect();
    assert!(names.windows(2).all(|w| w[0] <= w[1]), "{:?}", names);
  }

  #[tokio::test]
  async fn list_defaults_to_newest_first() {
    let svc = service();
    let older = svc
      .create(fields("Acme Co", "Server is down in region X"))
      .await
      .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let newer = svc
      .create(fields("Beta Inc", "Printer is on fire again"))
      .await
      .unwrap();

    let page = svc.list(&ListParams::default()).await.unwrap();
    assert_eq!(page.incidents[0].id, newer.id);
    assert_eq!(page.incidents[1].id, older.id);
  }

  #[tokio::test]
  async fn unknown_sort_field_is_a_validation_error() {
    let err = service()
      .list(&params(&[("sortField", "secret")]))
      .await
      .unwrap_err();
    assert!(matches!(err, ServiceError::Model(ModelError::Validation(_))));
  }

  #[tokio::test]
  async fn update_status_keeps_other_fields_and_advances_updated_at() {
    let svc = service();
    let created = svc
      .create(fields("Acme Co", "Server is down in region X"))
      .await
      .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = svc
      .update(
        &created.id.to_string(),
        IncidentFields {
          status: Some("resolved".into()),
          ..Default::default()
        },
      )
      .await
      .unwrap();

    assert_eq!(updated.status, Status::Resolved);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.customer_name, created.customer_name);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.priority, created.priority);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
  }

  #[tokio::test]
  async fn invalid_update_leaves_record_untouched() {
    let svc = service();
    let created = svc
      .create(fields("Acme Co", "Server is down in region X"))
      .await
      .unwrap();
    let id = created.id.to_string();

    let err = svc
      .update(
        &id,
        IncidentFields {
          customer_name: Some("A".into()),
          ..Default::default()
        },
      )
      .await
      .unwrap_err();
    match err {
      ServiceError::Model(ModelError::Validation(errors)) => {
        assert!(errors.contains_key("customerName"))
      }
      other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(svc.get_by_id(&id).await.unwrap(), created);
  }

  #[tokio::test]
  async fn update_missing_record_is_not_found() {
    let err = service()
      .update(
        &IncidentId::new().to_string(),
        IncidentFields {
          status: Some("closed".into()),
          ..Default::default()
        },
      )
      .await
      .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
  }

  #[tokio::test]
  async fn storage_failure_surfaces_as_persistence_error() {
    let mut store = MockIncidentStore::new();
    store
      .expect_find()
      .once()
      .returning(|_| Err(StoreError::Corrupt("status \"weird\"".into())));
    let svc = IncidentService::new(Arc::new(store), ListConfig::default());

    let err = svc.get_by_id(&IncidentId::new().to_string()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Persistence(_)));
  }
}
