//! Support API Health Checker
//!
//! Issues concurrent, individually timed GET probes against a list of endpoints
//! and returns one result per endpoint in input order. Failures are data.

pub mod checker;
pub mod config;
pub mod error;
pub mod types;

pub use checker::{check_api_health, HealthChecker};
pub use config::Config;
pub use error::HealthCheckError;
pub use types::{summarize, ProbeResult, Summary, TIMEOUT_MESSAGE};
