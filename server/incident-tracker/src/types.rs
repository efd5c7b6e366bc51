//! Core types for the incident tracker (in-memory records + JSON contracts).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Incident record
// ---------------------------------------------------------------------------

/// One tracked incident.
///
/// `detected_at` is fixed at creation. `resolved_at` and `rca` are set together,
/// exactly once, and `resolved_at` never precedes `detected_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Incident {
  pub id: u64,
  pub title: String,
  /// Free-form label (e.g. "low", "medium", "high"); never validated.
  pub severity: String,
  pub affected_services: Vec<String>,
  pub detected_at: DateTime<Utc>,
  pub resolved_at: Option<DateTime<Utc>>,
  pub rca: Option<String>,
}

impl Incident {
  pub fn is_resolved(&self) -> bool {
    self.resolved_at.is_some()
  }

  /// Time from detection to resolution, if resolved.
  pub fn recovery_time(&self) -> Option<chrono::Duration> {
    self.resolved_at.map(|resolved| resolved - self.detected_at)
  }
}

// ---------------------------------------------------------------------------
// Inbound commands (JSON contract — one per stdin line)
// ---------------------------------------------------------------------------

/// One inbound command line. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
  Create {
    title: String,
    severity: String,
    #[serde(default)]
    affected_services: Vec<String>,
    /// RFC3339; defaults to the current time.
    #[serde(default)]
    detected_at: Option<String>,
  },
  Resolve {
    id: u64,
    rca: String,
    /// RFC3339; defaults to the current time.
    #[serde(default)]
    resolved_at: Option<String>,
  },
  Mttr,
  Report,
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
  Incident(Incident),
  Mttr { mttr_hours: f64 },
  Report { markdown: String },
}

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
