//! Seen-event registry for duplicate suppression.

use std::collections::HashSet;

/// Registry of event ids that have already been routed to a decision.
///
/// Grows for the lifetime of the process; there is no eviction. At VEN event
/// volumes this stays small relative to process uptime, so the unbounded
/// growth is an accepted trade-off rather than a supported workload.
///
/// Not internally synchronized: concurrent event deliveries must serialize
/// access, which [`VenEventHandler`](crate::ven::handler::VenEventHandler)
/// does with a mutex held across the check-and-mark sequence.
#[derive(Debug, Default)]
pub struct SeenEventRegistry {
    ids: HashSet<String>,
}

impl SeenEventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `id` has already been decided.
    pub fn is_duplicate(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Records `id` as decided. Idempotent: marking an already-seen id is a
    /// no-op. Returns `true` if the id was newly inserted.
    pub fn mark_seen(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    /// Number of distinct ids recorded.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
