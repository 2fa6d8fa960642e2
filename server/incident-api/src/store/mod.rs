//! Incident persistence backends.
//!
//! Every write touches exactly one record in one statement (or one lock
//! acquisition), so no multi-record transactions are needed.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use incident_model::{Incident, IncidentId, IncidentPatch, ListQuery};

pub use memory::MemoryIncidentStore;
pub use postgres::PgIncidentStore;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("storage error")]
  Sql(#[source] sqlx_core::Error),

  #[error("incident {0} already exists")]
  Duplicate(IncidentId),

  #[error("stored incident is corrupt: {0}")]
  Corrupt(String),
}

impl From<sqlx_core::Error> for StoreError {
  fn from(error: sqlx_core::Error) -> Self {
    Self::Sql(error)
  }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IncidentStore: Send + Sync {
  /// Persist a fully-formed record and return it as stored.
  async fn insert(&self, incident: Incident) -> Result<Incident, StoreError>;

  async fn find(&self, id: IncidentId) -> Result<Option<Incident>, StoreError>;

  /// One page in `query` order.
  async fn find_page(&self, query: ListQuery) -> Result<Vec<Incident>, StoreError>;

  async fn count(&self) -> Result<u64, StoreError>;

  /// Write only the `Some` fields of `patch` and refresh `updated_at`.
  /// `None` when no record has that id.
  async fn update(
    &self,
    id: IncidentId,
    patch: IncidentPatch,
    updated_at: DateTime<Utc>,
  ) -> Result<Option<Incident>, StoreError>;

  /// `false` when no record has that id.
  async fn remove(&self, id: IncidentId) -> Result<bool, StoreError>;
}
