//! Shared test fixtures for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use ven_agent::error::VenError;
use ven_agent::notify::Notifier;
use ven_agent::transport::VtnTransport;
use ven_agent::ven::Event;

/// A single DR event with one signal and one interval.
pub fn event(id: &str, payload: f64, start: DateTime<Utc>, duration: TimeDelta) -> Event {
    Event::single(id, payload, start, duration)
}

/// Notifier that records every boundary call.
#[derive(Default)]
pub struct RecordingNotifier {
    pub emails: Mutex<Vec<(String, String)>>,
    pub texts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn email_count(&self) -> usize {
        self.emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn text_count(&self) -> usize {
        self.texts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_email(&self, subject: &str, body: &str) -> Result<(), VenError> {
        self.emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((subject.to_string(), body.to_string()));
        Ok(())
    }

    async fn send_text(&self, body: &str) -> Result<(), VenError> {
        self.texts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(body.to_string());
        Ok(())
    }
}

/// One submitted report as seen by the recording transport.
#[derive(Debug, Clone)]
pub struct SubmittedReport {
    pub resource_id: String,
    pub measurement: String,
    pub value: f64,
    pub taken_at: DateTime<Utc>,
}

/// Transport that records submitted reports and can be made to fail.
#[derive(Default)]
pub struct RecordingVtn {
    pub reports: Mutex<Vec<SubmittedReport>>,
    pub fail: AtomicBool,
}

impl RecordingVtn {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn report_count(&self) -> usize {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl VtnTransport for RecordingVtn {
    async fn submit_report(
        &self,
        resource_id: &str,
        measurement: &str,
        value: f64,
        taken_at: DateTime<Utc>,
    ) -> Result<(), VenError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(VenError::Transport("VTN unreachable".to_string()));
        }
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SubmittedReport {
                resource_id: resource_id.to_string(),
                measurement: measurement.to_string(),
                value,
                taken_at,
            });
        Ok(())
    }
}
