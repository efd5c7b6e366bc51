//! Output types for the log scanner (JSON contract with the CLI).

use serde::Serialize;

/// Cache effectiveness over a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
  pub hit_rate: f64,
  pub hit_count: u64,
  pub miss_count: u64,
}

/// Output: one JSON object to stdout.
#[derive(Debug, Serialize)]
pub struct ScanReport {
  pub total_lines: usize,
  pub origin_errors: Vec<String>,
  pub cache: CacheStats,
}
