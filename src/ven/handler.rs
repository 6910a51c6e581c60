//! Per-event orchestration: dedup, expiry, decision, notification.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::notify::{NotificationQueue, NotificationRequest};

use super::decision::OptStrategy;
use super::dedup::SeenEventRegistry;
use super::event::{Event, OptDecision};

/// Single entry point for incoming DR events.
///
/// Per event id the handler moves through `Unseen -> {Duplicate | Expired |
/// Decided}`, evaluated in a fixed order: duplicate check first, expiry
/// second, decision third. The order matters: a retransmission of an
/// already-expired event must short-circuit as a duplicate, never re-evaluate
/// expiry.
///
/// `handle` is synchronous from the transport's perspective; the transport
/// awaits the decision before acknowledging the event. Notification dispatch
/// happens on the side through the bounded queue.
pub struct VenEventHandler {
    ven_name: String,
    seen: Mutex<SeenEventRegistry>,
    strategy: Box<dyn OptStrategy>,
    notifications: NotificationQueue,
}

impl VenEventHandler {
    pub fn new(
        ven_name: impl Into<String>,
        strategy: Box<dyn OptStrategy>,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            ven_name: ven_name.into(),
            seen: Mutex::new(SeenEventRegistry::new()),
            strategy,
            notifications,
        }
    }

    /// Handles one incoming event against the current wall clock.
    pub fn handle(&self, event: &Event) -> OptDecision {
        self.handle_at(event, Utc::now())
    }

    /// Handles one incoming event as of `now`.
    ///
    /// Malformed events (no signal, no interval, negative duration) are
    /// rejected as opt-outs and logged; crashing the VEN over a bad event
    /// would be worse than declining it.
    pub fn handle_at(&self, event: &Event, now: DateTime<Utc>) -> OptDecision {
        // The registry lock is held across the whole check-and-mark sequence
        // so two concurrent deliveries of the same id cannot both observe
        // "unseen" and double-notify.
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);

        // 1. Duplicate: already decided, no side effects, no re-insertion.
        if seen.is_duplicate(&event.id) {
            debug!(event_id = %event.id, "ignoring duplicate event");
            return OptDecision::OptOut;
        }

        // 2. Expired: declined but *not* recorded, so a late non-expired
        // retransmission with a fresh interval would still be processed.
        match event.is_expired(now) {
            Ok(true) => {
                info!(event_id = %event.id, "ignoring expired event");
                return OptDecision::OptOut;
            }
            Ok(false) => {}
            Err(err) => {
                warn!(event_id = %event.id, %err, "rejecting malformed event");
                return OptDecision::OptOut;
            }
        }

        // 3. Decide. The id is recorded either way: a decision is produced
        // once per distinct event and never revised.
        seen.mark_seen(&event.id);
        drop(seen);

        let decision = self.strategy.decide(event);
        let payload = event.first_payload().unwrap_or_default();
        info!(
            event_id = %event.id,
            payload,
            decision = decision.as_protocol_str(),
            "new DR event received"
        );

        self.notifications.enqueue(NotificationRequest {
            subject: format!("{} DR Event", self.ven_name),
            body: format!(
                "New DR Event Received:\nID: {}\nSignal: {}",
                event.id, payload
            ),
        });

        decision
    }

    /// Number of distinct event ids decided so far.
    pub fn seen_count(&self) -> usize {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
