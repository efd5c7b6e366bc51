//! Recovery statistics over tracked incidents.

use crate::types::Incident;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Mean-Time-To-Recovery in hours.
///
/// Averages `resolved_at - detected_at` over resolved incidents only.
/// Returns 0.0 when nothing is resolved.
pub fn mean_time_to_recovery(incidents: &[Incident]) -> f64 {
  let (total_ms, resolved) = incidents
    .iter()
    .filter_map(Incident::recovery_time)
    .fold((0i64, 0u32), |(sum, n), d| (sum + d.num_milliseconds(), n + 1));

  if resolved == 0 {
    return 0.0;
  }
  total_ms as f64 / MS_PER_HOUR / resolved as f64
}
