//! Probe result types (JSON contract with the CLI).

use serde::Serialize;

/// Error text recorded when the timer wins the race.
pub const TIMEOUT_MESSAGE: &str = "Timeout";

/// Outcome of one GET against one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
  pub url: String,
  /// HTTP status, absent when no response arrived.
  pub status: Option<u16>,
  pub response_time_ms: u64,
  pub healthy: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl ProbeResult {
  pub fn responded(url: &str, status: u16, healthy: bool, response_time_ms: u64) -> Self {
    Self {
      url: url.to_string(),
      status: Some(status),
      response_time_ms,
      healthy,
      error: None,
    }
  }

  pub fn failed(url: &str, response_time_ms: u64, error: impl Into<String>) -> Self {
    Self {
      url: url.to_string(),
      status: None,
      response_time_ms,
      healthy: false,
      error: Some(error.into()),
    }
  }

  pub fn timed_out(&self) -> bool {
    self.error.as_deref() == Some(TIMEOUT_MESSAGE)
  }
}

/// Counts over a batch of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
  pub total: usize,
  pub healthy: usize,
  pub unhealthy: usize,
}

pub fn summarize(results: &[ProbeResult]) -> Summary {
  let healthy = results.iter().filter(|r| r.healthy).count();
  Summary {
    total: results.len(),
    healthy,
    unhealthy: results.len() - healthy,
  }
}
