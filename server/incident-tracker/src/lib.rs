//! Support Incident Tracker — in-memory incident log with MTTR and Markdown reports.
//!
//! Incidents are opened, resolved once with an RCA, and summarized as a
//! deterministic Markdown report. The store is an explicit, caller-owned value.
//!
//! No DB, no network; pure computation + in-memory state.

pub mod commands;
pub mod error;
pub mod report;
pub mod stats;
pub mod store;
pub mod types;

pub use error::TrackerError;
pub use store::IncidentStore;
pub use types::{Command, CommandOutput, Incident};
