//! Demand-response event model and expiry evaluation.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::VenError;

/// The VEN's response to a DR event, serialized into the protocol's
/// event response as `"optIn"` / `"optOut"`.
///
/// Produced once per distinct event id and never revised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptDecision {
    OptIn,
    OptOut,
}

impl OptDecision {
    /// OpenADR wire string for this decision.
    pub fn as_protocol_str(&self) -> &'static str {
        match self {
            OptDecision::OptIn => "optIn",
            OptDecision::OptOut => "optOut",
        }
    }
}

/// One active window of a DR signal.
#[derive(Debug, Clone, Copy)]
pub struct EventInterval {
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window length; must be non-negative.
    pub duration: TimeDelta,
}

impl EventInterval {
    /// End of the window (`start + duration`).
    pub fn end(&self) -> DateTime<Utc> {
        self.start + self.duration
    }
}

/// A DR signal: an opaque payload (price, load-shed level, ...) over one or
/// more intervals.
#[derive(Debug, Clone)]
pub struct EventSignal {
    pub payload: f64,
    pub intervals: Vec<EventInterval>,
}

/// A DR event received from the VTN.
///
/// The id is unique per DR event and stable across retransmissions. A
/// well-formed event carries at least one signal with at least one interval;
/// events that do not are rejected by [`Event::is_expired`].
#[derive(Debug, Clone)]
pub struct Event {
    pub id: String,
    pub signals: Vec<EventSignal>,
}

impl Event {
    /// Convenience constructor for the common single-signal, single-interval
    /// event shape.
    pub fn single(
        id: impl Into<String>,
        payload: f64,
        start: DateTime<Utc>,
        duration: TimeDelta,
    ) -> Self {
        Self {
            id: id.into(),
            signals: vec![EventSignal {
                payload,
                intervals: vec![EventInterval { start, duration }],
            }],
        }
    }

    /// Payload of the first signal, if present.
    pub fn first_payload(&self) -> Option<f64> {
        self.signals.first().map(|s| s.payload)
    }

    /// Returns whether the event's active window has lapsed at `now`.
    ///
    /// Only the first signal's first interval is consulted; multi-interval
    /// events are not aggregated. This is a known simplification carried over
    /// from the deployed behavior, not an oversight.
    ///
    /// # Errors
    ///
    /// Returns [`VenError::InvalidEvent`] if the event has no signal, the
    /// first signal has no interval, or the interval duration is negative.
    pub fn is_expired(&self, now: DateTime<Utc>) -> Result<bool, VenError> {
        let signal = self.signals.first().ok_or_else(|| VenError::InvalidEvent {
            id: self.id.clone(),
            reason: "event has no signals",
        })?;
        let interval = signal.intervals.first().ok_or_else(|| VenError::InvalidEvent {
            id: self.id.clone(),
            reason: "first signal has no intervals",
        })?;
        if interval.duration < TimeDelta::zero() {
            return Err(VenError::InvalidEvent {
                id: self.id.clone(),
                reason: "interval duration is negative",
            });
        }
        Ok(interval.end() < now)
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, OptDecision};
    use chrono::{TimeDelta, Utc};

    #[test]
    fn expired_when_window_has_lapsed() {
        let now = Utc::now();
        let event = Event::single(
            "evt-1",
            1.0,
            now - TimeDelta::minutes(10),
            TimeDelta::minutes(5),
        );
        assert!(event.is_expired(now).expect("well-formed event"));
    }

    #[test]
    fn active_window_is_not_expired() {
        let now = Utc::now();
        let event = Event::single("evt-2", 1.0, now, TimeDelta::hours(1));
        assert!(!event.is_expired(now).expect("well-formed event"));
    }

    #[test]
    fn window_ending_exactly_now_is_not_expired() {
        let now = Utc::now();
        let event = Event::single("evt-3", 1.0, now - TimeDelta::minutes(5), TimeDelta::minutes(5));
        // end == now: `end < now` is false
        assert!(!event.is_expired(now).expect("well-formed event"));
    }

    #[test]
    fn event_without_signals_is_invalid() {
        let event = Event {
            id: "evt-4".to_string(),
            signals: Vec::new(),
        };
        assert!(event.is_expired(Utc::now()).is_err());
    }

    #[test]
    fn signal_without_intervals_is_invalid() {
        let event = Event {
            id: "evt-5".to_string(),
            signals: vec![super::EventSignal {
                payload: 0.5,
                intervals: Vec::new(),
            }],
        };
        assert!(event.is_expired(Utc::now()).is_err());
    }

    #[test]
    fn negative_duration_is_invalid() {
        let now = Utc::now();
        let event = Event::single("evt-6", 1.0, now, TimeDelta::minutes(-5));
        assert!(event.is_expired(now).is_err());
    }

    #[test]
    fn only_first_interval_is_consulted() {
        let now = Utc::now();
        let mut event = Event::single(
            "evt-7",
            1.0,
            now - TimeDelta::minutes(10),
            TimeDelta::minutes(5),
        );
        // A later, still-active interval does not rescue the event.
        event.signals[0].intervals.push(super::EventInterval {
            start: now,
            duration: TimeDelta::hours(1),
        });
        assert!(event.is_expired(now).expect("well-formed event"));
    }

    #[test]
    fn protocol_strings_match_openadr() {
        assert_eq!(OptDecision::OptIn.as_protocol_str(), "optIn");
        assert_eq!(OptDecision::OptOut.as_protocol_str(), "optOut");
    }
}
