//! Periodic telemetry sampling and report submission.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::transport::VtnTransport;

/// One recurring telemetry stream; immutable once registered.
#[derive(Debug, Clone)]
pub struct ReportDescriptor {
    /// Resource the measurement belongs to (e.g. `device001`).
    pub resource_id: String,
    /// Measurement name (e.g. `voltage`).
    pub measurement: String,
    /// Period between samples.
    pub sampling_interval: Duration,
}

/// Caller-supplied measurement source, polled once per sampling tick.
#[async_trait]
pub trait MeterSource: Send + Sync {
    async fn read(&self) -> f64;
}

/// Placeholder meter returning a constant; production deployments read
/// charger meter values here.
#[derive(Debug, Clone, Copy)]
pub struct FixedMeter(pub f64);

#[async_trait]
impl MeterSource for FixedMeter {
    async fn read(&self) -> f64 {
        self.0
    }
}

/// Periodic sampler: on each tick, read the meter and forward the value,
/// timestamped, to the VTN.
///
/// Ticks never overlap. The loop awaits the meter read and the submission
/// inline, and missed ticks are skipped rather than queued, so a collection
/// that overruns the period costs the following tick instead of building a
/// backlog.
pub struct ReportSampler {
    descriptor: ReportDescriptor,
    meter: Arc<dyn MeterSource>,
    transport: Arc<dyn VtnTransport>,
}

impl ReportSampler {
    pub fn new(
        descriptor: ReportDescriptor,
        meter: Arc<dyn MeterSource>,
        transport: Arc<dyn VtnTransport>,
    ) -> Self {
        Self {
            descriptor,
            meter,
            transport,
        }
    }

    /// Spawns the sampling loop; the first sample is taken one full period
    /// after the call.
    pub fn spawn(self) -> SamplerHandle {
        let token = CancellationToken::new();
        let loop_token = token.clone();
        let task = tokio::spawn(self.run(loop_token));
        SamplerHandle { token, task }
    }

    async fn run(self, token: CancellationToken) {
        let period = self.descriptor.sampling_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Cancellation wins over a simultaneously-due tick.
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            // The sample runs outside the select so cancellation lets an
            // in-flight read/submission finish instead of tearing it down.
            let value = self.meter.read().await;
            let taken_at = Utc::now();
            match self
                .transport
                .submit_report(
                    &self.descriptor.resource_id,
                    &self.descriptor.measurement,
                    value,
                    taken_at,
                )
                .await
            {
                Ok(()) => debug!(
                    resource_id = %self.descriptor.resource_id,
                    measurement = %self.descriptor.measurement,
                    value,
                    "report submitted"
                ),
                // Skip this tick; the next scheduled tick retries.
                Err(err) => warn!(%err, "report submission failed"),
            }
        }
    }
}

/// Handle to a running sampler.
pub struct SamplerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SamplerHandle {
    /// Signals cancellation without waiting. Observed before the next tick;
    /// an in-flight sample still completes.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancels and waits for the loop to wind down, letting any in-flight
    /// sample complete.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.task.await;
    }

    /// Cancels and abandons any in-flight sample.
    pub fn abort(self) {
        self.token.cancel();
        self.task.abort();
    }
}
