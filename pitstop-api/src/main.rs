use std::net::SocketAddr;
use std::sync::Arc;

use pitstop_api::{app, state::{AppState, AuthConfig}, worker};
use pitstop_booking::{BookingService, LogNotifier};
use pitstop_schedule::AvailabilityCalendar;
use pitstop_store::{InMemoryAvailabilityStore, InMemoryBookingRepository, InMemoryServiceCatalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitstop_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = pitstop_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Pitstop API on port {}", config.server.port);

    let availability = Arc::new(InMemoryAvailabilityStore::new());
    let catalog = Arc::new(InMemoryServiceCatalog::new());
    let repo = Arc::new(InMemoryBookingRepository::new());

    let calendar = AvailabilityCalendar::new(
        availability.clone(),
        config.booking_rules.slot_minutes,
    );
    let service = Arc::new(BookingService::new(
        repo,
        catalog,
        calendar,
        Arc::new(LogNotifier),
        config.booking_rules.max_concurrent_bookings_per_slot,
    ));

    tokio::spawn(worker::start_expiry_worker(
        service.clone(),
        config.booking_rules.expiry_sweep_seconds,
    ));

    let app_state = AppState {
        bookings: service,
        availability,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
