pub mod app_config;
pub mod availability_repo;
pub mod booking_repo;
pub mod catalog_repo;

pub use app_config::Config;
pub use availability_repo::InMemoryAvailabilityStore;
pub use booking_repo::InMemoryBookingRepository;
pub use catalog_repo::InMemoryServiceCatalog;
