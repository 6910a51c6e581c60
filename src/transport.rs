//! Seam to the wire-level OpenADR transport.
//!
//! The handshake, polling, and XML plumbing live in the transport library
//! outside this crate. The core only needs two touch points: it is *called*
//! with incoming events (see [`VenAgent::on_event`](crate::agent::VenAgent::on_event))
//! and it *calls* out to submit telemetry reports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::VenError;

/// Outbound half of the VTN connection.
#[async_trait]
pub trait VtnTransport: Send + Sync {
    /// Submits one telemetry sample for `resource_id`.
    ///
    /// # Errors
    ///
    /// Returns [`VenError::Transport`] when the VTN is unreachable or rejects
    /// the report. The sampler treats this as "skip this tick, retry on the
    /// next scheduled tick".
    async fn submit_report(
        &self,
        resource_id: &str,
        measurement: &str,
        value: f64,
        taken_at: DateTime<Utc>,
    ) -> Result<(), VenError>;
}
