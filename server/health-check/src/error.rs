//! Structured error types for the health checker.
//!
//! Probe failures are never errors; they are recorded in each `ProbeResult`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthCheckError {
  #[error("config: {var}: {reason}")]
  Config { var: String, reason: String },

  #[error("http client: {0}")]
  Client(#[from] reqwest::Error),
}

impl HealthCheckError {
  pub fn config(var: &str, reason: &str) -> Self {
    Self::Config {
      var: var.to_string(),
      reason: reason.to_string(),
    }
  }
}
