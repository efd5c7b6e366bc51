//! Binary entrypoint: read JSON command lines from stdin, write JSON lines to stdout.
//!
//! Each input line is a Command (`create`, `resolve`, `mttr`, `report`). Output
//! lines are either:
//! - The command's output (incident record, MTTR, or Markdown report)
//! - An ErrorOutput (when the line is malformed or names an unknown incident)

use incident_tracker::commands;
use incident_tracker::types::ErrorOutput;
use incident_tracker::{IncidentStore, TrackerError};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  let mut store = IncidentStore::new();

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        tracing::error!("read error: {}", e);
        std::process::exit(1);
      }
    };

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let result = commands::parse_line(trimmed).and_then(|cmd| commands::execute(&mut store, &cmd));
    match result {
      Ok(output) => {
        let _ = serde_json::to_writer(&mut out, &output);
      }
      Err(e) => {
        let err = match &e {
          TrackerError::Validation { field, reason } => {
            ErrorOutput::new(reason.clone()).with_field(field.clone())
          }
          TrackerError::Json(_) => ErrorOutput::new(e.to_string()),
        };
        let _ = serde_json::to_writer(&mut out, &err);
      }
    }
    let _ = writeln!(out);
  }

  let _ = out.flush();
}
