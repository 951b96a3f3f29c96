use std::sync::Arc;

use pitstop_booking::BookingService;
use pitstop_store::InMemoryAvailabilityStore;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<BookingService>,
    pub availability: Arc<InMemoryAvailabilityStore>,
    pub auth: AuthConfig,
}
