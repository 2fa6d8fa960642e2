//! List queries: pagination parameters, sortable columns, page summaries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::config::ListConfig;
use crate::error::ModelError;
use crate::types::Incident;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
  CustomerName,
  Description,
  Priority,
  Status,
  CreatedAt,
  UpdatedAt,
}

impl SortField {
  pub const ALL: [Self; 6] = [
    Self::CustomerName,
    Self::Description,
    Self::Priority,
    Self::Status,
    Self::CreatedAt,
    Self::UpdatedAt,
  ];

  pub fn from_wire(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|f| f.as_str() == s)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::CustomerName => "customerName",
      Self::Description => "description",
      Self::Priority => "priority",
      Self::Status => "status",
      Self::CreatedAt => "createdAt",
      Self::UpdatedAt => "updatedAt",
    }
  }

  /// Text columns compare byte-wise; enums compare by their wire value.
  pub fn compare(self, a: &Incident, b: &Incident) -> Ordering {
    match self {
      Self::CustomerName => a.customer_name.cmp(&b.customer_name),
      Self::Description => a.description.cmp(&b.description),
      Self::Priority => a.priority.as_str().cmp(b.priority.as_str()),
      Self::Status => a.status.as_str().cmp(b.status.as_str()),
      Self::CreatedAt => a.created_at.cmp(&b.created_at),
      Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
  Asc,
  Desc,
}

impl SortOrder {
  pub fn from_wire(s: &str) -> Option<Self> {
    match s.to_ascii_lowercase().as_str() {
      "asc" => Some(Self::Asc),
      "desc" => Some(Self::Desc),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Asc => "asc",
      Self::Desc => "desc",
    }
  }
}

// ---------------------------------------------------------------------------
// Inbound query string (JSON contract: what the caller sends)
// ---------------------------------------------------------------------------

/// Raw list parameters. Everything is optional and kept as text so each
/// malformed value is reported against its own name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  #[serde(default)]
  pub page: Option<String>,
  #[serde(default)]
  pub limit: Option<String>,
  #[serde(default)]
  pub sort_field: Option<String>,
  #[serde(default)]
  pub sort_order: Option<String>,
}

impl ListParams {
  /// Apply defaults (`page=1`, configured `limit`, `createdAt`, `desc`) and
  /// reject anything malformed. Oversized limits are clamped.
  pub fn resolve(&self, config: &ListConfig) -> Result<ListQuery, ModelError> {
    let page = match non_blank(&self.page) {
      Some(raw) => positive(raw, "page")?,
      None => 1,
    };
    let limit = match non_blank(&self.limit) {
      Some(raw) => positive(raw, "limit")?.min(config.max_limit),
      None => config.default_limit,
    };
    let sort_field = match non_blank(&self.sort_field) {
      Some(raw) => SortField::from_wire(raw).ok_or_else(|| {
        ModelError::validation("sortField", &format!("{} is not a sortable field", raw))
      })?,
      None => SortField::CreatedAt,
    };
    let sort_order = match non_blank(&self.sort_order) {
      Some(raw) => SortOrder::from_wire(raw).ok_or_else(|| {
        ModelError::validation("sortOrder", "sort order must be asc or desc")
      })?,
      None => SortOrder::Desc,
    };

    Ok(ListQuery {
      page,
      limit,
      sort_field,
      sort_order,
    })
  }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
  v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn positive(raw: &str, field: &str) -> Result<u64, ModelError> {
  match raw.parse::<u64>() {
    Ok(n) if n >= 1 => Ok(n),
    _ => Err(ModelError::validation(field, "must be a positive integer")),
  }
}

// ---------------------------------------------------------------------------
// Resolved query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
  pub page: u64,
  pub limit: u64,
  pub sort_field: SortField,
  pub sort_order: SortOrder,
}

impl Default for ListQuery {
  fn default() -> Self {
    Self {
      page: 1,
      limit: ListConfig::default().default_limit,
      sort_field: SortField::CreatedAt,
      sort_order: SortOrder::Desc,
    }
  }
}

impl ListQuery {
  pub fn skip(&self) -> u64 {
    self.page.saturating_sub(1).saturating_mul(self.limit)
  }

  /// Total order used for every page: the sort key, then `id` ascending, so
  /// equal keys never straddle pages inconsistently.
  pub fn compare(&self, a: &Incident, b: &Incident) -> Ordering {
    let primary = self.sort_field.compare(a, b);
    let primary = match self.sort_order {
      SortOrder::Asc => primary,
      SortOrder::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
  }

  pub fn pagination(&self, total: u64) -> Pagination {
    Pagination {
      total,
      page: self.page,
      total_pages: total_pages(total, self.limit),
      limit: self.limit,
    }
  }
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
  if limit == 0 {
    return 0;
  }
  total.div_ceil(limit)
}

// ---------------------------------------------------------------------------
// Output types (JSON contract: what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
  pub total: u64,
  pub page: u64,
  pub total_pages: u64,
  pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentPage {
  pub incidents: Vec<Incident>,
  pub pagination: Pagination,
}
