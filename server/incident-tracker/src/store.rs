//! Incident store: owns the ordered incident log for one process.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::report;
use crate::stats;
use crate::types::Incident;

/// In-memory incident log. Caller-owned; mutation needs `&mut self`, so there is
/// exactly one writer at a time and no locking.
#[derive(Debug, Default)]
pub struct IncidentStore {
  incidents: Vec<Incident>,
}

impl IncidentStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Open an incident detected now.
  pub fn create_incident(
    &mut self,
    title: impl Into<String>,
    severity: impl Into<String>,
    affected_services: Vec<String>,
  ) -> &Incident {
    self.create_incident_at(title, severity, affected_services, Utc::now())
  }

  /// Open an incident detected at `detected_at`.
  ///
  /// The id is the number of incidents already stored plus one.
  pub fn create_incident_at(
    &mut self,
    title: impl Into<String>,
    severity: impl Into<String>,
    affected_services: Vec<String>,
    detected_at: DateTime<Utc>,
  ) -> &Incident {
    let incident = Incident {
      id: self.incidents.len() as u64 + 1,
      title: title.into(),
      severity: severity.into(),
      affected_services,
      detected_at,
      resolved_at: None,
      rca: None,
    };
    debug!(id = incident.id, severity = %incident.severity, "incident created");

    self.incidents.push(incident);
    &self.incidents[self.incidents.len() - 1]
  }

  /// Resolve an incident now. See [`IncidentStore::resolve_incident_at`].
  pub fn resolve_incident(&mut self, id: u64, rca: impl Into<String>) -> Option<&Incident> {
    self.resolve_incident_at(id, rca, Utc::now())
  }

  /// Resolve an incident at `resolved_at`.
  ///
  /// Returns `None` for an unknown id. An incident that is already resolved is
  /// returned unchanged and the new `rca` is discarded.
  pub fn resolve_incident_at(
    &mut self,
    id: u64,
    rca: impl Into<String>,
    resolved_at: DateTime<Utc>,
  ) -> Option<&Incident> {
    let incident = self.incidents.iter_mut().find(|i| i.id == id)?;

    if incident.is_resolved() {
      debug!(id, "incident already resolved; keeping original rca");
      return Some(&*incident);
    }

    // Resolution never precedes detection.
    incident.resolved_at = Some(resolved_at.max(incident.detected_at));
    incident.rca = Some(rca.into());
    debug!(id, "incident resolved");
    Some(&*incident)
  }

  pub fn get(&self, id: u64) -> Option<&Incident> {
    self.incidents.iter().find(|i| i.id == id)
  }

  /// All incidents in insertion order.
  pub fn incidents(&self) -> &[Incident] {
    &self.incidents
  }

  pub fn open_incidents(&self) -> impl Iterator<Item = &Incident> {
    self.incidents.iter().filter(|i| !i.is_resolved())
  }

  pub fn len(&self) -> usize {
    self.incidents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.incidents.is_empty()
  }

  /// Mean-Time-To-Recovery in hours; 0.0 when nothing is resolved.
  pub fn calculate_mttr(&self) -> f64 {
    stats::mean_time_to_recovery(&self.incidents)
  }

  pub fn generate_markdown_report(&self) -> String {
    report::render_markdown(&self.incidents)
  }
}
