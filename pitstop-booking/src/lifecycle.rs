use chrono::{DateTime, Utc};

use crate::models::{Booking, BookingAction, BookingStatus};
use pitstop_shared::BookingEventKind;

/// Apply a lifecycle transition to a booking in place.
///
/// The transition table:
///
/// | action     | allowed from        | result    |
/// |------------|---------------------|-----------|
/// | confirm    | pending             | confirmed |
/// | reject     | pending             | rejected  |
/// | cancel     | pending, confirmed  | cancelled |
/// | reschedule | pending, confirmed  | pending   |
/// | complete   | confirmed           | completed |
/// | expire     | pending             | expired   |
///
/// Slot validity for `reschedule` is the caller's job and must be
/// established before calling in; this function only moves state.
/// On any error the booking is left untouched.
pub fn apply(
    booking: &mut Booking,
    action: BookingAction,
    reason: Option<&str>,
    new_scheduled_at: Option<DateTime<Utc>>,
) -> Result<BookingEventKind, LifecycleError> {
    let status = booking.status;

    match action {
        BookingAction::Confirm => {
            require(status, action, &[BookingStatus::Pending])?;
            booking.status = BookingStatus::Confirmed;
            booking.touch();
            Ok(BookingEventKind::Confirmed)
        }
        BookingAction::Reject => {
            require(status, action, &[BookingStatus::Pending])?;
            let reason = non_empty_reason(action, reason)?;
            booking.status = BookingStatus::Rejected;
            booking.cancel_reason = Some(reason);
            booking.touch();
            Ok(BookingEventKind::Rejected)
        }
        BookingAction::Cancel => {
            require(
                status,
                action,
                &[BookingStatus::Pending, BookingStatus::Confirmed],
            )?;
            let reason = non_empty_reason(action, reason)?;
            booking.status = BookingStatus::Cancelled;
            booking.cancel_reason = Some(reason);
            booking.touch();
            Ok(BookingEventKind::Cancelled)
        }
        BookingAction::Reschedule => {
            require(
                status,
                action,
                &[BookingStatus::Pending, BookingStatus::Confirmed],
            )?;
            let at = new_scheduled_at.ok_or(LifecycleError::MissingSchedule)?;
            // A rescheduled booking needs fresh provider approval, so a
            // confirmed booking drops back to pending.
            booking.scheduled_at = at;
            booking.status = BookingStatus::Pending;
            booking.touch();
            Ok(BookingEventKind::Rescheduled)
        }
        BookingAction::Complete => {
            require(status, action, &[BookingStatus::Confirmed])?;
            booking.status = BookingStatus::Completed;
            booking.touch();
            Ok(BookingEventKind::Completed)
        }
        BookingAction::Expire => {
            require(status, action, &[BookingStatus::Pending])?;
            booking.status = BookingStatus::Expired;
            booking.touch();
            Ok(BookingEventKind::Expired)
        }
    }
}

fn require(
    status: BookingStatus,
    action: BookingAction,
    allowed: &[BookingStatus],
) -> Result<(), LifecycleError> {
    if allowed.contains(&status) {
        Ok(())
    } else {
        Err(LifecycleError::InvalidTransition { action, status })
    }
}

fn non_empty_reason(
    action: BookingAction,
    reason: Option<&str>,
) -> Result<String, LifecycleError> {
    match reason.map(str::trim) {
        Some(r) if !r.is_empty() => Ok(r.to_string()),
        _ => Err(LifecycleError::MissingReason { action }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("Action {action} is not allowed from status {status}")]
    InvalidTransition {
        action: BookingAction,
        status: BookingStatus,
    },

    #[error("Action {action} requires a reason")]
    MissingReason { action: BookingAction },

    #[error("Reschedule requires a new scheduled time")]
    MissingSchedule,
}
