use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::schedule::{hhmm, DaySchedule};

/// A fixed-duration bookable window within a day's open hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

/// Generate contiguous slots from open to close at the given granularity.
/// A slot that would run past closing time is excluded; a closed day
/// yields nothing.
pub fn generate_slots(day: &DaySchedule, slot_minutes: u32) -> Vec<TimeSlot> {
    if !day.is_open || slot_minutes == 0 {
        return Vec::new();
    }

    if day.start_time == day.end_time {
        // Open day with zero-width hours: a data-quality problem in the
        // provider's schedule, treated as closed rather than a failure.
        warn!(
            start = %day.start_time.format(hhmm::FORMAT),
            "open day with equal start and end times, producing no slots"
        );
        return Vec::new();
    }

    let step = Duration::minutes(i64::from(slot_minutes));
    let mut slots = Vec::new();
    let mut cursor = day.start_time;

    loop {
        let (slot_end, wrapped) = cursor.overflowing_add_signed(step);
        if wrapped != 0 || slot_end > day.end_time {
            break;
        }
        slots.push(TimeSlot {
            start: cursor,
            end: slot_end,
        });
        cursor = slot_end;
    }

    slots
}
