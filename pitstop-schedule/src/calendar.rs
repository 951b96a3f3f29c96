use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::schedule::Availability;
use crate::slots::{generate_slots, TimeSlot};

pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Lookup of a provider's published availability. Backed by whatever
/// store the host service uses; reads are concurrent and lock-free from
/// the calendar's point of view.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    async fn get_availability(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<Availability>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Derives concrete bookable slots for a date from a provider's weekly
/// recurring schedule, and validates requested timestamps against them.
pub struct AvailabilityCalendar {
    source: Arc<dyn AvailabilitySource>,
    slot_minutes: u32,
}

impl AvailabilityCalendar {
    pub fn new(source: Arc<dyn AvailabilitySource>, slot_minutes: u32) -> Self {
        Self {
            source,
            slot_minutes,
        }
    }

    /// Slots for one calendar date, in order. A closed weekday or a
    /// provider with no published availability yields an empty list,
    /// not an error.
    pub async fn slots_for(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, CalendarError> {
        let availability = self
            .source
            .get_availability(provider_id)
            .await
            .map_err(CalendarError::Source)?;

        match availability {
            Some(availability) => {
                let day = availability.week.day(date.weekday());
                Ok(generate_slots(day, self.slot_minutes))
            }
            None => {
                debug!(%provider_id, "no availability published, no slots");
                Ok(Vec::new())
            }
        }
    }

    /// True iff the timestamp lands exactly on a slot boundary of an
    /// open day, and its date is not strictly before today (UTC).
    pub async fn is_bookable(
        &self,
        provider_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, CalendarError> {
        if at.date_naive() < Utc::now().date_naive() {
            return Ok(false);
        }

        let slots = self.slots_for(provider_id, at.date_naive()).await?;
        Ok(slots.iter().any(|slot| slot.start == at.time()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Availability lookup failed: {0}")]
    Source(Box<dyn std::error::Error + Send + Sync>),
}
