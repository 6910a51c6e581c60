//! OpenADR-style Virtual End Node (VEN) agent core.
//!
//! Receives demand-response events from a VTN, decides whether to opt in or
//! out, and periodically reports a telemetry measurement back. The wire-level
//! OpenADR transport and the human-notification channels are collaborators
//! behind the [`transport::VtnTransport`] and [`notify::Notifier`] traits.

pub mod agent;
pub mod config;
pub mod error;
/// Best-effort notification dispatch.
pub mod notify;
/// Periodic telemetry sampling.
pub mod report;
pub mod transport;
/// Event dedup, expiry, and opt-decision logic.
pub mod ven;
