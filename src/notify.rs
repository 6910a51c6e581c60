//! Best-effort notification dispatch to property managers.
//!
//! The event handler never talks to the notification channels directly: it
//! enqueues a request on a bounded queue and returns, so channel latency and
//! failures stay off the protocol response path. A spawned worker drains the
//! queue and makes both boundary calls (email, then text) per request.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::VenError;

/// Default bound on queued, not-yet-delivered notifications.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Human-notification channels (Twilio/SendGrid in production).
///
/// Both calls are best-effort from the core's perspective: a failure is
/// reported to the dispatcher, logged, and never surfaced to the VTN.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email(&self, subject: &str, body: &str) -> Result<(), VenError>;

    async fn send_text(&self, body: &str) -> Result<(), VenError>;
}

/// One queued notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub subject: String,
    pub body: String,
}

/// Sending half of the dispatch queue, held by the event handler.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::Sender<NotificationRequest>,
}

impl NotificationQueue {
    /// Enqueues a request without blocking. A full queue drops the request
    /// with a warning; notification is a side effect, not a gate.
    pub fn enqueue(&self, request: NotificationRequest) {
        if let Err(err) = self.tx.try_send(request) {
            warn!(%err, "notification queue full, dropping request");
        }
    }
}

/// Spawns the dispatch worker and returns the queue plus its join handle.
///
/// The worker exits once every [`NotificationQueue`] clone has been dropped
/// and the queue has drained; await the handle for a clean shutdown.
pub fn spawn_dispatcher(
    notifier: Arc<dyn Notifier>,
    capacity: usize,
) -> (NotificationQueue, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<NotificationRequest>(capacity);
    let worker = tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            // Each channel is attempted independently: an email failure must
            // not suppress the text, and neither failure reaches the caller.
            if let Err(err) = notifier.send_email(&request.subject, &request.body).await {
                warn!(%err, "notification dispatch failed");
            }
            if let Err(err) = notifier.send_text(&request.body).await {
                warn!(%err, "notification dispatch failed");
            }
        }
    });
    (NotificationQueue { tx }, worker)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::{NotificationQueue, NotificationRequest, Notifier, spawn_dispatcher};
    use crate::error::{NotifyChannel, VenError};

    struct CountingNotifier {
        emails: AtomicUsize,
        texts: AtomicUsize,
        fail_email: bool,
    }

    impl CountingNotifier {
        fn new(fail_email: bool) -> Self {
            Self {
                emails: AtomicUsize::new(0),
                texts: AtomicUsize::new(0),
                fail_email,
            }
        }
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn send_email(&self, _subject: &str, _body: &str) -> Result<(), VenError> {
            self.emails.fetch_add(1, Ordering::SeqCst);
            if self.fail_email {
                Err(VenError::Notification {
                    channel: NotifyChannel::Email,
                    reason: "smtp refused".to_string(),
                })
            } else {
                Ok(())
            }
        }

        async fn send_text(&self, _body: &str) -> Result<(), VenError> {
            self.texts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn request(n: usize) -> NotificationRequest {
        NotificationRequest {
            subject: format!("subject {n}"),
            body: format!("body {n}"),
        }
    }

    #[tokio::test]
    async fn worker_delivers_to_both_channels() {
        let notifier = Arc::new(CountingNotifier::new(false));
        let (queue, worker) = spawn_dispatcher(notifier.clone(), 8);

        queue.enqueue(request(1));
        queue.enqueue(request(2));
        drop(queue);
        worker.await.expect("worker should exit cleanly");

        assert_eq!(notifier.emails.load(Ordering::SeqCst), 2);
        assert_eq!(notifier.texts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn email_failure_does_not_suppress_text() {
        let notifier = Arc::new(CountingNotifier::new(true));
        let (queue, worker) = spawn_dispatcher(notifier.clone(), 8);

        queue.enqueue(request(1));
        drop(queue);
        worker.await.expect("worker should exit cleanly");

        assert_eq!(notifier.emails.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.texts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn full_queue_drops_instead_of_blocking() {
        // No worker draining: fill a capacity-1 channel and overflow it.
        let (tx, mut rx) = tokio::sync::mpsc::channel(1);
        let queue = NotificationQueue { tx };

        queue.enqueue(request(1));
        queue.enqueue(request(2)); // dropped, must not panic or block

        assert_eq!(rx.recv().await, Some(request(1)));
        drop(queue);
        assert_eq!(rx.recv().await, None);
    }
}
