//! Binary entrypoint: read log text from stdin, write one JSON report to stdout.

use log_scanner::scan;
use std::io::{self, Read, Write};

fn main() {
  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "log-scanner error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;

  let report = scan(&raw);
  let json = serde_json::to_vec(&report)?;
  io::stdout().write_all(&json)?;
  Ok(())
}
