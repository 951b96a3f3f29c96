pub mod authz;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod notify;
pub mod repository;
pub mod service;

pub use authz::{Actor, ActorRole, AuthorizationGate, AuthzError};
pub use error::BookingError;
pub use lifecycle::LifecycleError;
pub use models::{Booking, BookingAction, BookingStatus};
pub use notify::{LogNotifier, Notifier};
pub use repository::{BookingRepository, RepositoryError};
pub use service::BookingService;
