//! Incident Tracker domain model: records, validation rules, list queries.
//!
//! Defines what a valid incident is, how partial updates are checked, and how
//! a page of incidents is selected and ordered. Shared by every store backend
//! and by the HTTP boundary.
//!
//! No DB, no network; pure computation.

pub mod config;
pub mod error;
pub mod query;
pub mod types;
pub mod validation;

pub use config::ListConfig;
pub use error::ModelError;
pub use query::{IncidentPage, ListParams, ListQuery, Pagination, SortField, SortOrder};
pub use types::{Incident, IncidentFields, IncidentId, IncidentPatch, NewIncident, Priority, Status};
pub use validation::ValidationErrors;
