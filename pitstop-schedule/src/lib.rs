pub mod calendar;
pub mod schedule;
pub mod slots;

pub use calendar::{AvailabilityCalendar, AvailabilitySource, CalendarError, DEFAULT_SLOT_MINUTES};
pub use schedule::{Availability, DaySchedule, ScheduleError, WeeklySchedule};
pub use slots::TimeSlot;
