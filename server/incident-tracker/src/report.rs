//! Markdown report rendering.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::stats;
use crate::types::Incident;

/// ISO-8601 with millisecond precision and a `Z` suffix, e.g. `2025-01-15T10:30:00.000Z`.
pub fn iso8601(ts: &DateTime<Utc>) -> String {
  ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render one section per incident (store order), then the MTTR footer.
///
/// The output always ends with `**MTTR:** X.XX hours` and no trailing newline.
pub fn render_markdown(incidents: &[Incident]) -> String {
  let mut out = String::from("# Incident Report\n\n");

  for incident in incidents {
    let resolved = incident
      .resolved_at
      .as_ref()
      .map(iso8601)
      .unwrap_or_else(|| "Unresolved".to_string());
    let rca = incident.rca.as_deref().unwrap_or("Pending");

    out.push_str(&format!("## Incident #{}: {}\n\n", incident.id, incident.title));
    out.push_str(&format!("- **Severity:** {}\n", incident.severity));
    out.push_str(&format!(
      "- **Affected Services:** {}\n",
      incident.affected_services.join(", ")
    ));
    out.push_str(&format!("- **Detected:** {}\n", iso8601(&incident.detected_at)));
    out.push_str(&format!("- **Resolved:** {}\n", resolved));
    out.push_str(&format!("- **RCA:** {}\n\n", rca));
  }

  out.push_str(&format!(
    "**MTTR:** {:.2} hours",
    stats::mean_time_to_recovery(incidents)
  ));
  out
}
