use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened to a booking, for party notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingEventKind {
    Requested,
    Confirmed,
    Rejected,
    Cancelled,
    Rescheduled,
    Completed,
    Expired,
}

/// Notification payload emitted after a successful booking mutation.
/// Delivery is fire-and-forget; consumers must not assume ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEvent {
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub kind: BookingEventKind,
    pub scheduled_at: DateTime<Utc>,
    pub occurred_at: DateTime<Utc>,
}
