use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serde helper for `"HH:MM"` times. Anything else (seconds, 12-hour
/// clock, garbage) is rejected at the boundary so the domain only ever
/// carries typed times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse an `"HH:MM"` string into a typed time.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(value, hhmm::FORMAT)
        .map_err(|_| ScheduleError::InvalidTime(value.to_string()))
}

/// Open hours for one weekday. Times are kept even when the day is
/// closed; the slot generator ignores them in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub is_open: bool,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl DaySchedule {
    pub fn closed() -> Self {
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        Self {
            is_open: false,
            start_time: midnight,
            end_time: midnight,
        }
    }

    pub fn open(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            is_open: true,
            start_time,
            end_time,
        }
    }

    /// Open days must not have inverted hours. Equal start and end is
    /// tolerated as a degenerate closed day (flagged by the generator).
    pub fn validate(&self, day: Weekday) -> Result<(), ScheduleError> {
        if self.is_open && self.start_time > self.end_time {
            return Err(ScheduleError::InvertedHours {
                day: day.to_string(),
                start: self.start_time.format(hhmm::FORMAT).to_string(),
                end: self.end_time.format(hhmm::FORMAT).to_string(),
            });
        }
        Ok(())
    }
}

/// A provider's recurring weekly schedule. All seven days are required;
/// deserialization fails if any is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub mon: DaySchedule,
    pub tue: DaySchedule,
    pub wed: DaySchedule,
    pub thu: DaySchedule,
    pub fri: DaySchedule,
    pub sat: DaySchedule,
    pub sun: DaySchedule,
}

impl WeeklySchedule {
    pub fn all_closed() -> Self {
        Self {
            mon: DaySchedule::closed(),
            tue: DaySchedule::closed(),
            wed: DaySchedule::closed(),
            thu: DaySchedule::closed(),
            fri: DaySchedule::closed(),
            sat: DaySchedule::closed(),
            sun: DaySchedule::closed(),
        }
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            self.day(weekday).validate(weekday)?;
        }
        Ok(())
    }
}

/// A provider's published availability. Created all-closed when the
/// provider onboards, overwritten whole on edit, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub provider_id: Uuid,
    pub week: WeeklySchedule,
}

impl Availability {
    pub fn all_closed(provider_id: Uuid) -> Self {
        Self {
            provider_id,
            week: WeeklySchedule::all_closed(),
        }
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.week.validate()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid hours for {day}: start {start} is not before end {end}")]
    InvertedHours {
        day: String,
        start: String,
        end: String,
    },
}
