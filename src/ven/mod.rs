//! Core VEN event-processing modules.

/// Opt-in/opt-out decision strategies.
pub mod decision;
/// Seen-event registry for duplicate suppression.
pub mod dedup;
/// DR event model and expiry evaluation.
pub mod event;
pub mod handler;

// Re-export the main types for convenience
pub use decision::{AlwaysOptIn, OptStrategy};
pub use dedup::SeenEventRegistry;
pub use event::{Event, EventInterval, EventSignal, OptDecision};
pub use handler::VenEventHandler;
