//! Health checker configuration with sane defaults.

use std::time::Duration;

use crate::error::HealthCheckError;

/// Per-probe timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Environment variable overriding [`Config::timeout_ms`].
pub const TIMEOUT_ENV: &str = "HEALTH_CHECK_TIMEOUT_MS";

/// Tunables for a probe batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// How long each GET may take before it is reported as `Timeout`.
  pub timeout_ms: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      timeout_ms: DEFAULT_TIMEOUT_MS,
    }
  }
}

impl Config {
  pub fn with_timeout_ms(timeout_ms: u64) -> Self {
    Self { timeout_ms }
  }

  /// Defaults, overridden by `HEALTH_CHECK_TIMEOUT_MS` when set.
  pub fn from_env() -> Result<Self, HealthCheckError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HealthCheckError> {
    let mut config = Self::default();
    if let Some(raw) = lookup(TIMEOUT_ENV) {
      config.timeout_ms = raw
        .trim()
        .parse()
        .map_err(|_| HealthCheckError::config(TIMEOUT_ENV, "must be a whole number of milliseconds"))?;
    }
    Ok(config)
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }
}
