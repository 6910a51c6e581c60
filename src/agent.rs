//! Process-level wiring of handler, notification dispatcher, and sampler.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::config::VenConfig;
use crate::notify::{DEFAULT_QUEUE_CAPACITY, Notifier, spawn_dispatcher};
use crate::report::{MeterSource, ReportSampler, SamplerHandle};
use crate::transport::VtnTransport;
use crate::ven::decision::OptStrategy;
use crate::ven::event::{Event, OptDecision};
use crate::ven::handler::VenEventHandler;

/// A running VEN agent: event handler plus the background notification and
/// sampling tasks.
///
/// The transport library calls [`VenAgent::on_event`] for each received DR
/// event and serializes the returned decision into the event response. The
/// report sampler runs on its own schedule until [`VenAgent::shutdown`].
pub struct VenAgent {
    handler: VenEventHandler,
    notify_worker: JoinHandle<()>,
    sampler: SamplerHandle,
}

impl VenAgent {
    /// Wires up the agent and spawns its background tasks.
    pub fn start(
        config: &VenConfig,
        transport: Arc<dyn VtnTransport>,
        notifier: Arc<dyn Notifier>,
        strategy: Box<dyn OptStrategy>,
        meter: Arc<dyn MeterSource>,
    ) -> Self {
        let (queue, notify_worker) = spawn_dispatcher(notifier, DEFAULT_QUEUE_CAPACITY);
        let handler = VenEventHandler::new(config.ven.name.clone(), strategy, queue);
        let sampler = ReportSampler::new(config.report.descriptor(), meter, transport).spawn();
        info!(
            ven_name = %config.ven.name,
            vtn_url = %config.ven.vtn_url,
            "VEN agent started"
        );
        Self {
            handler,
            notify_worker,
            sampler,
        }
    }

    /// Inbound entry point, invoked by the transport per received event.
    pub fn on_event(&self, event: &Event) -> OptDecision {
        self.handler.handle(event)
    }

    /// Stops the sampler (letting an in-flight report complete), closes the
    /// notification queue, and waits for the dispatcher to drain.
    pub async fn shutdown(self) {
        self.sampler.stop().await;
        // Dropping the handler drops the last queue sender; the worker exits
        // once the remaining requests are delivered.
        drop(self.handler);
        let _ = self.notify_worker.await;
        info!("VEN agent stopped");
    }
}
