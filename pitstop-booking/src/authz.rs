use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::{Booking, BookingAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    Customer,
    Provider,
    Admin,
    SuperAdmin,
}

impl ActorRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, ActorRole::Admin | ActorRole::SuperAdmin)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActorRole::Customer => "CUSTOMER",
            ActorRole::Provider => "PROVIDER",
            ActorRole::Admin => "ADMIN",
            ActorRole::SuperAdmin => "SUPER_ADMIN",
        };
        f.write_str(s)
    }
}

/// The party invoking an operation. Always passed in explicitly; the
/// domain core never reads ambient session state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Actor {
    pub role: ActorRole,
    pub id: Uuid,
}

/// Role- and ownership-gated authorization, evaluated strictly before
/// any state mutation.
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// May this actor invoke this transition on this booking?
    ///
    /// Customers may cancel or reschedule their own booking. Providers
    /// may confirm, reject, cancel, reschedule and complete bookings
    /// targeting them. Admins may do anything, including forcing an
    /// expire. Everyone else is denied.
    pub fn authorize(
        actor: &Actor,
        booking: &Booking,
        action: BookingAction,
    ) -> Result<(), AuthzError> {
        let allowed = match actor.role {
            ActorRole::Admin | ActorRole::SuperAdmin => true,
            ActorRole::Customer => {
                actor.id == booking.customer_id
                    && matches!(action, BookingAction::Cancel | BookingAction::Reschedule)
            }
            ActorRole::Provider => {
                actor.id == booking.provider_id
                    && matches!(
                        action,
                        BookingAction::Confirm
                            | BookingAction::Reject
                            | BookingAction::Cancel
                            | BookingAction::Reschedule
                            | BookingAction::Complete
                    )
            }
        };

        if allowed {
            Ok(())
        } else {
            Err(AuthzError::Unauthorized {
                role: actor.role,
                action,
            })
        }
    }

    /// Reads are limited to the booking's own parties and admins.
    pub fn authorize_view(actor: &Actor, booking: &Booking) -> Result<(), AuthzError> {
        let allowed = match actor.role {
            ActorRole::Admin | ActorRole::SuperAdmin => true,
            ActorRole::Customer => actor.id == booking.customer_id,
            ActorRole::Provider => actor.id == booking.provider_id,
        };
        if allowed {
            Ok(())
        } else {
            Err(AuthzError::NotAParty { role: actor.role })
        }
    }

    /// The administrative hard delete sits outside the lifecycle and is
    /// admin-only.
    pub fn authorize_delete(actor: &Actor) -> Result<(), AuthzError> {
        if actor.role.is_admin() {
            Ok(())
        } else {
            Err(AuthzError::AdminOnly { role: actor.role })
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    #[error("Role {role} may not {action} this booking")]
    Unauthorized {
        role: ActorRole,
        action: BookingAction,
    },

    #[error("Role {role} is not a party to this booking")]
    NotAParty { role: ActorRole },

    #[error("Role {role} may not delete bookings")]
    AdminOnly { role: ActorRole },
}
