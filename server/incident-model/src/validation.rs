//! Table-driven field validation for incident records.
//!
//! Only fields present in the input are checked, so the same rules serve
//! full creates, partial updates, and per-field checks while a form is edited.

use std::collections::BTreeMap;

use crate::error::ModelError;
use crate::types::{Incident, IncidentFields, Priority, Status};

/// Field name (wire casing) -> human-readable message.
pub type ValidationErrors = BTreeMap<String, String>;

pub const CUSTOMER_NAME_MIN: usize = 2;
pub const CUSTOMER_NAME_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 1000;

/// Which bound a value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
  Min(usize),
  Max(usize),
}

/// One length rule: field, optional bounds, message template.
pub struct LengthRule {
  pub field: &'static str,
  pub min: Option<usize>,
  pub max: Option<usize>,
  value: fn(&IncidentFields) -> Option<&str>,
  message: fn(Bound) -> String,
}

impl LengthRule {
  /// Length is counted in characters of the trimmed value.
  pub fn check(&self, value: &str) -> Option<String> {
    let len = value.trim().chars().count();
    match (self.min, self.max) {
      (Some(min), _) if len < min => Some((self.message)(Bound::Min(min))),
      (_, Some(max)) if len > max => Some((self.message)(Bound::Max(max))),
      _ => None,
    }
  }
}

pub const LENGTH_RULES: &[LengthRule] = &[
  LengthRule {
    field: "customerName",
    min: Some(CUSTOMER_NAME_MIN),
    max: Some(CUSTOMER_NAME_MAX),
    value: customer_name,
    message: customer_name_message,
  },
  LengthRule {
    field: "description",
    min: Some(DESCRIPTION_MIN),
    max: Some(DESCRIPTION_MAX),
    value: description,
    message: description_message,
  },
];

fn customer_name(fields: &IncidentFields) -> Option<&str> {
  fields.customer_name.as_deref()
}

fn description(fields: &IncidentFields) -> Option<&str> {
  fields.description.as_deref()
}

fn customer_name_message(bound: Bound) -> String {
  match bound {
    Bound::Min(n) => format!("Customer name must be at least {} characters long", n),
    Bound::Max(n) => format!("Customer name cannot exceed {} characters", n),
  }
}

fn description_message(bound: Bound) -> String {
  match bound {
    Bound::Min(n) => format!("Description must be at least {} characters long", n),
    Bound::Max(n) => format!("Description cannot exceed {} characters", n),
  }
}

/// Check every supplied field. Empty map means valid.
pub fn validate(fields: &IncidentFields) -> ValidationErrors {
  let mut errors = ValidationErrors::new();

  for rule in LENGTH_RULES {
    if let Some(message) = (rule.value)(fields).and_then(|v| rule.check(v)) {
      errors.insert(rule.field.to_string(), message);
    }
  }

  if let Some(priority) = fields.priority.as_deref() {
    if Priority::from_wire(priority).is_none() {
      errors.insert(
        "priority".into(),
        format!("{} is not a valid priority level", priority),
      );
    }
  }

  if let Some(status) = fields.status.as_deref() {
    if Status::from_wire(status).is_none() {
      errors.insert("status".into(), format!("{} is not a valid status", status));
    }
  }

  errors
}

pub fn ensure_valid(fields: &IncidentFields) -> Result<(), ModelError> {
  let errors = validate(fields);
  if errors.is_empty() {
    Ok(())
  } else {
    Err(ModelError::Validation(errors))
  }
}

/// Re-check a whole record, e.g. after merging an update into it.
pub fn validate_incident(incident: &Incident) -> Result<(), ModelError> {
  ensure_valid(&IncidentFields::from(incident))
}
