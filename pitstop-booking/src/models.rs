use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use pitstop_catalog::PriceBreakdown;
use pitstop_shared::ServicePrice;

/// Booking status. `Pending` is the only initial state; `Completed`,
/// `Rejected`, `Cancelled` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Rejected,
    Cancelled,
    Expired,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed
                | BookingStatus::Rejected
                | BookingStatus::Cancelled
                | BookingStatus::Expired
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Expired => "EXPIRED",
        };
        f.write_str(s)
    }
}

/// A named transition on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingAction {
    Confirm,
    Reject,
    Cancel,
    Reschedule,
    Complete,
    Expire,
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingAction::Confirm => "CONFIRM",
            BookingAction::Reject => "REJECT",
            BookingAction::Cancel => "CANCEL",
            BookingAction::Reschedule => "RESCHEDULE",
            BookingAction::Complete => "COMPLETE",
            BookingAction::Expire => "EXPIRE",
        };
        f.write_str(s)
    }
}

/// A customer's service appointment with a provider. Never hard-deleted
/// while active; cancellation and rejection are terminal states, and the
/// administrative delete is a separate, audited operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub provider_id: Uuid,
    pub service_ids: Vec<i64>,
    pub service_prices: Vec<ServicePrice>,
    pub total_minor: i64,
    pub currency: String,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub cancel_reason: Option<String>,
    /// Optimistic concurrency token, bumped by the store on every write.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        customer_id: Uuid,
        provider_id: Uuid,
        service_ids: Vec<i64>,
        breakdown: PriceBreakdown,
        scheduled_at: DateTime<Utc>,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            provider_id,
            service_ids,
            service_prices: breakdown.service_prices,
            total_minor: breakdown.total_minor,
            currency: breakdown.currency,
            scheduled_at,
            notes,
            status: BookingStatus::Pending,
            cancel_reason: None,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
