pub mod models;
pub mod money;

pub use models::events::{BookingEvent, BookingEventKind};
pub use money::ServicePrice;
