//! Concurrent HTTP probes: fan out one GET per URL, join on all of them.

use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::HealthCheckError;
use crate::types::{summarize, ProbeResult, TIMEOUT_MESSAGE};

/// Reusable prober. Holds one HTTP client for connection reuse across batches.
#[derive(Debug, Clone)]
pub struct HealthChecker {
  client: reqwest::Client,
  config: Config,
}

impl HealthChecker {
  pub fn new(config: Config) -> Result<Self, HealthCheckError> {
    let client = reqwest::Client::builder().build()?;
    Ok(Self::with_client(client, config))
  }

  pub fn with_client(client: reqwest::Client, config: Config) -> Self {
    Self { client, config }
  }

  /// Probe every URL concurrently. One result per URL, in input order.
  ///
  /// Returns only once every probe has responded, failed, or timed out.
  pub async fn check<S: AsRef<str>>(&self, urls: &[S]) -> Vec<ProbeResult> {
    if urls.is_empty() {
      return Vec::new();
    }

    let started = Instant::now();
    let results = join_all(urls.iter().map(|url| self.probe(url.as_ref()))).await;

    let summary = summarize(&results);
    info!(
      total = summary.total,
      healthy = summary.healthy,
      unhealthy = summary.unhealthy,
      elapsed_ms = started.elapsed().as_millis() as u64,
      "health check batch complete"
    );
    results
  }

  /// Race a single GET against the configured timeout.
  ///
  /// When the timer wins, the in-flight request future is dropped, which
  /// aborts the request and frees its connection.
  pub async fn probe(&self, url: &str) -> ProbeResult {
    let start = Instant::now();
    let outcome = tokio::time::timeout(self.config.timeout(), self.client.get(url).send()).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let result = match outcome {
      Ok(Ok(response)) => {
        let status = response.status();
        ProbeResult::responded(url, status.as_u16(), status.is_success(), elapsed_ms)
      }
      Ok(Err(e)) => ProbeResult::failed(url, elapsed_ms, e.to_string()),
      Err(_) => ProbeResult::failed(url, elapsed_ms, TIMEOUT_MESSAGE),
    };

    if result.healthy {
      debug!(url, status = ?result.status, elapsed_ms, "probe healthy");
    } else {
      warn!(url, status = ?result.status, error = ?result.error, elapsed_ms, "probe unhealthy");
    }
    result
  }
}

/// Probe `urls` concurrently with a per-probe timeout of `timeout_ms`.
///
/// Never fails as a whole: if the HTTP client cannot be built, every URL gets
/// an unhealthy result carrying that error.
pub async fn check_api_health<S: AsRef<str>>(urls: &[S], timeout_ms: u64) -> Vec<ProbeResult> {
  match HealthChecker::new(Config::with_timeout_ms(timeout_ms)) {
    Ok(checker) => checker.check(urls).await,
    Err(e) => urls
      .iter()
      .map(|url| ProbeResult::failed(url.as_ref(), 0, e.to_string()))
      .collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn empty_url_list_returns_immediately() {
    let results = check_api_health::<&str>(&[], 5000).await;
    assert!(results.is_empty());
  }

  #[tokio::test]
  async fn invalid_url_is_captured_in_result() {
    let results = check_api_health(&["not a url"], 1000).await;
    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert_eq!(r.url, "not a url");
    assert!(!r.healthy);
    assert_eq!(r.status, None);
    assert!(r.error.is_some());
    assert!(!r.timed_out());
  }
}
