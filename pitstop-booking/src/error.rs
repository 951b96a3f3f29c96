use uuid::Uuid;

use crate::authz::AuthzError;
use crate::lifecycle::LifecycleError;
use crate::repository::RepositoryError;
use pitstop_catalog::PriceError;
use pitstop_schedule::CalendarError;

/// Everything the booking surface can fail with. Validation,
/// authorization, state, concurrency and infrastructure failures stay
/// distinct kinds so callers can react differently.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Requested slot is not bookable for this provider")]
    SlotUnavailable,

    #[error("Slot is already fully booked")]
    SlotFull,

    #[error("Unknown or inactive service offering: {0}")]
    UnknownService(i64),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Unauthorized(#[from] AuthzError),

    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    #[error("Booking {0} was modified concurrently; retry against fresh state")]
    ConcurrentModification(Uuid),

    #[error("Collaborator failure: {0}")]
    Infrastructure(String),
}

impl From<RepositoryError> for BookingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => BookingError::NotFound(id),
            RepositoryError::VersionConflict { id, .. } => BookingError::ConcurrentModification(id),
            RepositoryError::Backend(msg) => BookingError::Infrastructure(msg),
        }
    }
}

impl From<CalendarError> for BookingError {
    fn from(err: CalendarError) -> Self {
        BookingError::Infrastructure(err.to_string())
    }
}
