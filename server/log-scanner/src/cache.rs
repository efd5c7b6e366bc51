//! Cache HIT / MISS tallies.

use crate::types::CacheStats;

/// Classify each line by first match: `HIT` wins over `MISS`; anything else is skipped.
pub fn analyze_cache_performance<S: AsRef<str>>(lines: &[S]) -> CacheStats {
  let mut hit_count = 0u64;
  let mut miss_count = 0u64;

  for line in lines {
    let line = line.as_ref();
    if line.contains("HIT") {
      hit_count += 1;
    } else if line.contains("MISS") {
      miss_count += 1;
    }
  }

  let total = hit_count + miss_count;
  let hit_rate = if total == 0 {
    0.0
  } else {
    hit_count as f64 / total as f64
  };

  CacheStats {
    hit_rate,
    hit_count,
    miss_count,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counts_hits_and_misses() {
    let stats = analyze_cache_performance(&["HIT", "MISS", "HIT", "other"]);
    assert_eq!(stats.hit_count, 2);
    assert_eq!(stats.miss_count, 1);
    assert!((stats.hit_rate - 2.0 / 3.0).abs() < f64::EPSILON);
  }

  #[test]
  fn no_cache_lines_is_zero_rate() {
    let stats = analyze_cache_performance::<&str>(&[]);
    assert_eq!(stats, CacheStats::default());

    let stats = analyze_cache_performance(&["GET / 200", "GET /x 404"]);
    assert_eq!(stats.hit_rate, 0.0);
  }

  #[test]
  fn hit_takes_precedence_over_miss() {
    let stats = analyze_cache_performance(&["x-cache: MISS, HIT".to_string()]);
    assert_eq!(stats.hit_count, 1);
    assert_eq!(stats.miss_count, 0);
  }

  #[test]
  fn matching_is_case_sensitive() {
    let stats = analyze_cache_performance(&["cache hit", "cache miss"]);
    assert_eq!(stats.hit_count + stats.miss_count, 0);
  }
}
