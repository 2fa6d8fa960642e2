//! In-process store. Used when no database is configured, and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use incident_model::{Incident, IncidentId, IncidentPatch, ListQuery};

use super::{IncidentStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryIncidentStore {
  incidents: RwLock<HashMap<IncidentId, Incident>>,
}

impl MemoryIncidentStore {
  pub fn new() -> Self {
    Self::default()
  }
}

fn to_usize(n: u64) -> usize {
  usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl IncidentStore for MemoryIncidentStore {
  async fn insert(&self, incident: Incident) -> Result<Incident, StoreError> {
    let mut incidents = self.incidents.write().await;
    if incidents.contains_key(&incident.id) {
      return Err(StoreError::Duplicate(incident.id));
    }
    incidents.insert(incident.id, incident.clone());
    Ok(incident)
  }

  async fn find(&self, id: IncidentId) -> Result<Option<Incident>, StoreError> {
    Ok(self.incidents.read().await.get(&id).cloned())
  }

  async fn find_page(&self, query: ListQuery) -> Result<Vec<Incident>, StoreError> {
    let incidents = self.incidents.read().await;
    let mut all: Vec<&Incident> = incidents.values().collect();
    all.sort_by(|a, b| query.compare(a, b));

    Ok(
      all
        .into_iter()
        .skip(to_usize(query.skip()))
        .take(to_usize(query.limit))
        .cloned()
        .collect(),
    )
  }

  async fn count(&self) -> Result<u64, StoreError> {
    Ok(self.incidents.read().await.len() as u64)
  }

  async fn update(
    &self,
    id: IncidentId,
    patch: IncidentPatch,
    updated_at: DateTime<Utc>,
  ) -> Result<Option<Incident>, StoreError> {
    let mut incidents = self.incidents.write().await;
    Ok(incidents.get_mut(&id).map(|incident| {
      incident.apply(&patch, updated_at);
      incident.clone()
    }))
  }

  async fn remove(&self, id: IncidentId) -> Result<bool, StoreError> {
    Ok(self.incidents.write().await.remove(&id).is_some())
  }
}
