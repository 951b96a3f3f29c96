use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use pitstop_shared::BookingEvent;

/// Party notification collaborator (email/SMS/push behind the host
/// service). Failures never affect the transition that triggered them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        event: BookingEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Default notifier: structured log line only.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        event: BookingEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(
            booking_id = %event.booking_id,
            kind = ?event.kind,
            "booking notification"
        );
        Ok(())
    }
}

/// Fire-and-forget dispatch on a spawned task. A notifier failure is
/// logged and dropped.
pub fn dispatch(notifier: Arc<dyn Notifier>, event: BookingEvent) {
    tokio::spawn(async move {
        let booking_id = event.booking_id;
        if let Err(e) = notifier.notify(event).await {
            warn!(%booking_id, error = %e, "notification dispatch failed");
        }
    });
}
