//! Core types for incident records (JSON contracts + internal models).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;
use crate::validation;

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// Store-assigned incident identifier. Immutable once issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(Uuid);

impl IncidentId {
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  /// Format pre-check run before any store lookup.
  ///
  /// Accepts the textual UUID forms (hyphenated, simple, braced, urn) and
  /// nothing else, so malformed ids never reach a backend.
  pub fn parse(raw: &str) -> Result<Self, ModelError> {
    Uuid::try_parse(raw)
      .map(Self)
      .map_err(|_| ModelError::invalid_identifier(raw))
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for IncidentId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for IncidentId {
  fn from(id: Uuid) -> Self {
    Self(id)
  }
}

impl fmt::Display for IncidentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

// ---------------------------------------------------------------------------
// Priority / status enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
}

impl Priority {
  pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

  /// Exact wire value; anything outside the set is rejected.
  pub fn from_wire(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|p| p.as_str() == s)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

impl fmt::Display for Priority {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
  #[default]
  Open,
  InProgress,
  Resolved,
  Closed,
}

impl Status {
  pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

  pub fn from_wire(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|st| st.as_str() == s)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::InProgress => "in-progress",
      Self::Resolved => "resolved",
      Self::Closed => "closed",
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ---------------------------------------------------------------------------
// Inbound field set (JSON contract: what the caller sends)
// ---------------------------------------------------------------------------

/// Caller-supplied incident fields. Every field is optional so the same shape
/// serves creates and partial updates. Unknown fields (including `id`,
/// `createdAt`, `updatedAt`) are silently ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFields {
  #[serde(default)]
  pub customer_name: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub priority: Option<String>,
  #[serde(default)]
  pub status: Option<String>,
}

impl IncidentFields {
  /// Trim the free-text fields the way they are persisted. Enum values are
  /// matched exactly and left alone.
  pub fn normalized(self) -> Self {
    Self {
      customer_name: self.customer_name.map(|s| s.trim().to_string()),
      description: self.description.map(|s| s.trim().to_string()),
      ..self
    }
  }
}

impl From<&Incident> for IncidentFields {
  fn from(incident: &Incident) -> Self {
    Self {
      customer_name: Some(incident.customer_name.clone()),
      description: Some(incident.description.clone()),
      priority: Some(incident.priority.as_str().to_string()),
      status: Some(incident.status.as_str().to_string()),
    }
  }
}

// ---------------------------------------------------------------------------
// Validated write models
// ---------------------------------------------------------------------------

/// Fields for a new record, already trimmed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
  pub customer_name: String,
  pub description: String,
  pub priority: Priority,
  pub status: Status,
}

impl NewIncident {
  /// Requires `customerName` and `description`, validates every supplied
  /// field, and applies enum defaults for omitted `priority` / `status`.
  pub fn from_fields(fields: IncidentFields) -> Result<Self, ModelError> {
    let fields = fields.normalized();

    let missing = |v: &Option<String>| v.as_deref().map_or(true, str::is_empty);
    if missing(&fields.customer_name) || missing(&fields.description) {
      return Err(ModelError::MissingFields);
    }

    validation::ensure_valid(&fields)?;

    Ok(Self {
      customer_name: fields.customer_name.unwrap_or_default(),
      description: fields.description.unwrap_or_default(),
      priority: fields
        .priority
        .as_deref()
        .and_then(Priority::from_wire)
        .unwrap_or_default(),
      status: fields
        .status
        .as_deref()
        .and_then(Status::from_wire)
        .unwrap_or_default(),
    })
  }
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentPatch {
  pub customer_name: Option<String>,
  pub description: Option<String>,
  pub priority: Option<Priority>,
  pub status: Option<Status>,
}

impl IncidentPatch {
  /// Validates only the supplied fields.
  pub fn from_fields(fields: IncidentFields) -> Result<Self, ModelError> {
    let fields = fields.normalized();
    validation::ensure_valid(&fields)?;

    Ok(Self {
      customer_name: fields.customer_name,
      description: fields.description,
      priority: fields.priority.as_deref().and_then(Priority::from_wire),
      status: fields.status.as_deref().and_then(Status::from_wire),
    })
  }

  pub fn is_empty(&self) -> bool {
    self.customer_name.is_none()
      && self.description.is_none()
      && self.priority.is_none()
      && self.status.is_none()
  }
}

// ---------------------------------------------------------------------------
// Stored record (JSON contract: what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
  pub id: IncidentId,
  pub customer_name: String,
  pub description: String,
  pub priority: Priority,
  pub status: Status,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Incident {
  /// Fresh record: both timestamps are `now`.
  pub fn create(id: IncidentId, fields: NewIncident, now: DateTime<Utc>) -> Self {
    Self {
      id,
      customer_name: fields.customer_name,
      description: fields.description,
      priority: fields.priority,
      status: fields.status,
      created_at: now,
      updated_at: now,
    }
  }

  /// Merge a patch and refresh `updated_at`. The timestamp never moves
  /// backwards, so `created_at <= updated_at` survives clock skew.
  pub fn apply(&mut self, patch: &IncidentPatch, now: DateTime<Utc>) {
    if let Some(name) = &patch.customer_name {
      self.customer_name = name.clone();
    }
    if let Some(description) = &patch.description {
      self.description = description.clone();
    }
    if let Some(priority) = patch.priority {
      self.priority = priority;
    }
    if let Some(status) = patch.status {
      self.status = status;
    }
    self.updated_at = now.max(self.updated_at);
  }
}
