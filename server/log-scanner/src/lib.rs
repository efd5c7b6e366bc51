//! Support Log Scanner — origin error extraction and cache hit ratios; no DB, no network.
//! Used by the binary for stdin/stdout; can also be called as a library.

mod cache;
mod origin;
mod types;

pub use cache::analyze_cache_performance;
pub use origin::{is_origin_error, parse_origin_errors};
pub use types::{CacheStats, ScanReport};

/// Split raw log text into lines (`\n` or `\r\n`, final empty line dropped).
///
/// Every scan in this crate splits through here.
pub fn split_lines(log_content: &str) -> Vec<&str> {
  log_content.lines().collect()
}

/// Run both scans over the log text and return the report (no I/O).
pub fn scan(log_content: &str) -> ScanReport {
  let lines = split_lines(log_content);
  ScanReport {
    total_lines: lines.len(),
    origin_errors: parse_origin_errors(log_content),
    cache: analyze_cache_performance(&lines),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scan_returns_valid_report_shape() {
    let log = "\
10.0.0.1 GET /img/a.png 200 HIT\n\
10.0.0.2 GET /api/cart 503 MISS\n\
10.0.0.3 GET /api/cart 200 MISS\n\
10.0.0.4 GET /healthz 200\n";
    let report = scan(log);
    assert_eq!(report.total_lines, 4);
    assert_eq!(report.origin_errors, vec!["10.0.0.2 GET /api/cart 503 MISS".to_string()]);
    assert_eq!(report.cache.hit_count, 1);
    assert_eq!(report.cache.miss_count, 2);
  }

  #[test]
  fn scans_agree_on_crlf_and_missing_final_newline() {
    let log = "GET /a 503 MISS\r\nGET /b 200 HIT\r\nGET /c 503 HIT";
    let report = scan(log);
    assert_eq!(report.total_lines, 3);
    assert_eq!(
      report.origin_errors,
      vec!["GET /a 503 MISS".to_string(), "GET /c 503 HIT".to_string()]
    );
    let split: Vec<String> = split_lines(log).into_iter().map(str::to_string).collect();
    assert!(report.origin_errors.iter().all(|line| split.contains(line)));
    assert_eq!(report.cache.hit_count + report.cache.miss_count, 3);
  }

  #[test]
  fn empty_log_is_empty_report() {
    let report = scan("");
    assert_eq!(report.total_lines, 0);
    assert!(report.origin_errors.is_empty());
    assert_eq!(report.cache, CacheStats::default());
  }
}
