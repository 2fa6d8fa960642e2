//! Timestamp utilities.

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at storage precision (microseconds), so a record returned
/// from a write compares equal to the same record read back later.
pub fn now() -> DateTime<Utc> {
  Utc::now().trunc_subsecs(6)
}
