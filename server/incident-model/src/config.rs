//! List configuration with sane defaults.

/// Page sizing rules applied when resolving a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
  /// Page size used when the caller sends no `limit`.
  pub default_limit: u64,
  /// Largest page size a caller may ask for. Larger requests are clamped.
  pub max_limit: u64,
}

impl Default for ListConfig {
  fn default() -> Self {
    Self {
      default_limit: 10,
      max_limit: 100,
    }
  }
}

impl ListConfig {
  pub fn with_max_limit(max_limit: u64) -> Self {
    let max_limit = max_limit.max(1);
    let defaults = Self::default();
    Self {
      default_limit: defaults.default_limit.min(max_limit),
      max_limit,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn max_limit_never_below_default_page() {
    let config = ListConfig::with_max_limit(5);
    assert_eq!(config.max_limit, 5);
    assert_eq!(config.default_limit, 5);
  }

  #[test]
  fn zero_max_limit_is_raised_to_one() {
    assert_eq!(ListConfig::with_max_limit(0).max_limit, 1);
  }
}
