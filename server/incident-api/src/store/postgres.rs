//! PostgreSQL store. Each operation is a single statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx_core::{query::query, query_scalar::query_scalar, row::Row};
use sqlx_postgres::{PgPool, PgPoolOptions, PgRow, Postgres};
use tracing::info;
use uuid::Uuid;

use incident_model::{
  Incident, IncidentId, IncidentPatch, ListQuery, Priority, SortField, SortOrder, Status,
};

use super::{IncidentStore, StoreError};

const CREATE_INCIDENTS_SQL: &str = include_str!("sql/create_incidents.sql");
const CREATE_CREATED_AT_INDEX_SQL: &str = include_str!("sql/create_incidents_created_at_index.sql");
const INSERT_INCIDENT_SQL: &str = include_str!("sql/insert_incident.sql");
const GET_INCIDENT_SQL: &str = include_str!("sql/get_incident.sql");
const UPDATE_INCIDENT_SQL: &str = include_str!("sql/update_incident.sql");
const DELETE_INCIDENT_SQL: &str = include_str!("sql/delete_incident.sql");
const COUNT_INCIDENTS_SQL: &str = include_str!("sql/count_incidents.sql");

#[derive(Debug, Clone)]
pub struct PgIncidentStore {
  pool: PgPool,
}

impl PgIncidentStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    Ok(Self::new(pool))
  }

  /// Create the `incidents` table and its index if missing.
  pub async fn ensure_schema(&self) -> Result<(), StoreError> {
    for sql in [CREATE_INCIDENTS_SQL, CREATE_CREATED_AT_INDEX_SQL] {
      query::<Postgres>(sql).execute(&self.pool).await?;
    }
    info!("incidents schema ready");
    Ok(())
  }
}

/// Sort column for `ORDER BY`. Text columns use the "C" collation so the
/// order is byte-wise, matching the in-memory store.
fn order_by(query: &ListQuery) -> String {
  let column = match query.sort_field {
    SortField::CustomerName => "customer_name COLLATE \"C\"",
    SortField::Description => "description COLLATE \"C\"",
    SortField::Priority => "priority COLLATE \"C\"",
    SortField::Status => "status COLLATE \"C\"",
    SortField::CreatedAt => "created_at",
    SortField::UpdatedAt => "updated_at",
  };
  let direction = match query.sort_order {
    SortOrder::Asc => "ASC",
    SortOrder::Desc => "DESC",
  };
  format!("{} {}, id ASC", column, direction)
}

fn list_sql(query: &ListQuery) -> String {
  format!(
    "SELECT id, customer_name, description, priority, status, created_at, updated_at \
     FROM incidents ORDER BY {} LIMIT $1 OFFSET $2",
    order_by(query)
  )
}

fn to_i64(n: u64) -> i64 {
  i64::try_from(n).unwrap_or(i64::MAX)
}

fn incident_from_row(row: &PgRow) -> Result<Incident, StoreError> {
  let priority: String = row.try_get("priority")?;
  let status: String = row.try_get("status")?;

  Ok(Incident {
    id: IncidentId::from(row.try_get::<Uuid, _>("id")?),
    customer_name: row.try_get("customer_name")?,
    description: row.try_get("description")?,
    priority: Priority::from_wire(&priority)
      .ok_or_else(|| StoreError::Corrupt(format!("priority {:?}", priority)))?,
    status: Status::from_wire(&status)
      .ok_or_else(|| StoreError::Corrupt(format!("status {:?}", status)))?,
    created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
  })
}

#[async_trait]
impl IncidentStore for PgIncidentStore {
  async fn insert(&self, incident: Incident) -> Result<Incident, StoreError> {
    let row = query::<Postgres>(INSERT_INCIDENT_SQL)
      .bind(incident.id.as_uuid())
      .bind(&incident.customer_name)
      .bind(&incident.description)
      .bind(incident.priority.as_str())
      .bind(incident.status.as_str())
      .bind(incident.created_at)
      .bind(incident.updated_at)
      .fetch_one(&self.pool)
      .await?;
    incident_from_row(&row)
  }

  async fn find(&self, id: IncidentId) -> Result<Option<Incident>, StoreError> {
    let row = query::<Postgres>(GET_INCIDENT_SQL)
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;
    row.as_ref().map(incident_from_row).transpose()
  }

  async fn find_page(&self, list: ListQuery) -> Result<Vec<Incident>, StoreError> {
    let sql = list_sql(&list);
    let rows = query::<Postgres>(&sql)
      .bind(to_i64(list.limit))
      .bind(to_i64(list.skip()))
      .fetch_all(&self.pool)
      .await?;
    rows.iter().map(incident_from_row).collect()
  }

  async fn count(&self) -> Result<u64, StoreError> {
    let total: i64 = query_scalar::<Postgres, i64>(COUNT_INCIDENTS_SQL)
      .fetch_one(&self.pool)
      .await?;
    u64::try_from(total).map_err(|_| StoreError::Corrupt(format!("row count {}", total)))
  }

  async fn update(
    &self,
    id: IncidentId,
    patch: IncidentPatch,
    updated_at: DateTime<Utc>,
  ) -> Result<Option<Incident>, StoreError> {
    let row = query::<Postgres>(UPDATE_INCIDENT_SQL)
      .bind(id.as_uuid())
      .bind(patch.customer_name)
      .bind(patch.description)
      .bind(patch.priority.map(Priority::as_str))
      .bind(patch.status.map(Status::as_str))
      .bind(updated_at)
      .fetch_optional(&self.pool)
      .await?;
    row.as_ref().map(incident_from_row).transpose()
  }

  async fn remove(&self, id: IncidentId) -> Result<bool, StoreError> {
    let result = query::<Postgres>(DELETE_INCIDENT_SQL)
      .bind(id.as_uuid())
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }
}
