use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{error, info};

use pitstop_booking::BookingService;

/// Periodic sweep that expires overdue pending bookings. The sweep
/// itself is idempotent, so an overlapping or repeated run is harmless.
pub async fn start_expiry_worker(service: Arc<BookingService>, period_seconds: u64) {
    let mut ticker = interval(Duration::from_secs(period_seconds.max(1)));
    info!(period_seconds, "expiry worker started");

    loop {
        ticker.tick().await;
        match service.expire_overdue(Utc::now()).await {
            Ok(0) => {}
            Ok(count) => info!(expired = count, "expiry sweep transitioned overdue bookings"),
            Err(e) => error!(error = %e, "expiry sweep failed"),
        }
    }
}
