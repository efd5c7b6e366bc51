//! Apply inbound commands to an incident store.

use chrono::{DateTime, Utc};

use crate::error::TrackerError;
use crate::store::IncidentStore;
use crate::types::{Command, CommandOutput};

/// Parse one JSON command line.
pub fn parse_line(line: &str) -> Result<Command, TrackerError> {
  Ok(serde_json::from_str(line)?)
}

/// Execute a command against the store and return its output.
///
/// Resolving an unknown id is the only store-level failure and surfaces as a
/// validation error on `id`.
pub fn execute(store: &mut IncidentStore, command: &Command) -> Result<CommandOutput, TrackerError> {
  match command {
    Command::Create {
      title,
      severity,
      affected_services,
      detected_at,
    } => {
      let detected_at = parse_optional_ts("detected_at", detected_at.as_deref())?;
      let incident = store.create_incident_at(
        title.as_str(),
        severity.as_str(),
        affected_services.clone(),
        detected_at,
      );
      Ok(CommandOutput::Incident(incident.clone()))
    }
    Command::Resolve {
      id,
      rca,
      resolved_at,
    } => {
      let resolved_at = parse_optional_ts("resolved_at", resolved_at.as_deref())?;
      store
        .resolve_incident_at(*id, rca.as_str(), resolved_at)
        .map(|incident| CommandOutput::Incident(incident.clone()))
        .ok_or_else(|| TrackerError::validation("id", &format!("no incident with id {}", id)))
    }
    Command::Mttr => Ok(CommandOutput::Mttr {
      mttr_hours: store.calculate_mttr(),
    }),
    Command::Report => Ok(CommandOutput::Report {
      markdown: store.generate_markdown_report(),
    }),
  }
}

/// RFC3339 timestamp, or the current time when absent.
fn parse_optional_ts(field: &str, raw: Option<&str>) -> Result<DateTime<Utc>, TrackerError> {
  match raw {
    Some(s) => Ok(
      DateTime::parse_from_rfc3339(s)
        .map_err(|e| TrackerError::validation(field, &format!("invalid RFC3339: {}", e)))?
        .with_timezone(&Utc),
    ),
    None => Ok(Utc::now()),
  }
}
