use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use pitstop_booking::Actor;
use pitstop_schedule::{Availability, AvailabilitySource, TimeSlot, WeeklySchedule};

#[derive(Debug, Deserialize)]
struct SlotsQuery {
    date: NaiveDate,
}

/// Unauthenticated slot listings for booking forms.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/v1/providers/{id}/slots", get(list_slots))
}

/// Authenticated schedule reads and mutations.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/providers/{id}/availability",
            get(get_availability).put(put_availability),
        )
        .route("/v1/providers/{id}/onboard", post(onboard_provider))
}

async fn list_slots(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slots = state.bookings.list_slots(provider_id, query.date).await?;
    Ok(Json(slots))
}

async fn get_availability(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Availability>, AppError> {
    let availability = state
        .availability
        .get_availability(provider_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| {
            AppError::NotFoundError(format!("No availability published for {}", provider_id))
        })?;
    Ok(Json(availability))
}

/// Overwrite the weekly schedule. Only the owning provider (or an
/// admin) may write; the record is replaced whole.
async fn put_availability(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(provider_id): Path<Uuid>,
    Json(week): Json<WeeklySchedule>,
) -> Result<Json<Availability>, AppError> {
    if !actor.role.is_admin() && actor.id != provider_id {
        return Err(AppError::AuthorizationError(
            "Only the owning provider may edit availability".to_string(),
        ));
    }

    let availability = Availability { provider_id, week };
    state.availability.upsert(availability.clone()).await?;
    Ok(Json(availability))
}

/// Register a provider with the all-closed default week. Idempotent;
/// an existing schedule is left alone.
async fn onboard_provider(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Availability>, AppError> {
    if !actor.role.is_admin() && actor.id != provider_id {
        return Err(AppError::AuthorizationError(
            "Only the provider or an admin may onboard".to_string(),
        ));
    }
    let availability = state.availability.onboard(provider_id).await;
    Ok(Json(availability))
}
