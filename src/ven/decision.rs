//! Opt-in/opt-out decision strategies.

use super::event::{Event, OptDecision};

/// Site-specific acceptance logic for DR events.
///
/// The handler filters duplicates and expired events before consulting the
/// strategy, so implementations only see events that are live and new. Real
/// deployments replace [`AlwaysOptIn`] with logic that checks local state
/// (charger availability, occupancy, price thresholds) without touching the
/// orchestration layer.
pub trait OptStrategy: Send + Sync {
    fn decide(&self, event: &Event) -> OptDecision;
}

/// Default strategy: opt in to every event that survives upstream filtering.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOptIn;

impl OptStrategy for AlwaysOptIn {
    fn decide(&self, _event: &Event) -> OptDecision {
        OptDecision::OptIn
    }
}
