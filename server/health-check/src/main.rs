//! Binary entrypoint: probe the URLs given on the command line, print JSON lines.
//!
//! Timeout comes from `HEALTH_CHECK_TIMEOUT_MS` (default 5000). Exit status is
//! 0 when every probe is healthy, 1 otherwise, 2 on usage or config errors.

use health_check::{summarize, Config, HealthChecker};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  let urls: Vec<String> = std::env::args().skip(1).collect();
  if urls.is_empty() {
    eprintln!("Usage: health-check <url> [<url>...]");
    std::process::exit(2);
  }

  let checker = match Config::from_env().and_then(HealthChecker::new) {
    Ok(c) => c,
    Err(e) => {
      eprintln!("health-check: {}", e);
      std::process::exit(2);
    }
  };

  let results = checker.check(&urls).await;

  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  for result in &results {
    let _ = serde_json::to_writer(&mut out, result);
    let _ = writeln!(out);
  }
  let _ = out.flush();

  if summarize(&results).unhealthy > 0 {
    std::process::exit(1);
  }
}
