use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use pitstop_booking::{Actor, ActorRole, Booking, BookingAction};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookingRequest {
    provider_id: Uuid,
    service_ids: Vec<i64>,
    scheduled_at: DateTime<Utc>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionRequest {
    action: BookingAction,
    reason: Option<String>,
    new_scheduled_at: Option<DateTime<Utc>>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(request_booking))
        .route("/v1/bookings/{id}", get(get_booking).delete(delete_booking))
        .route("/v1/bookings/{id}/actions", post(apply_action))
}

async fn request_booking(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    if actor.role != ActorRole::Customer {
        return Err(AppError::AuthorizationError(
            "Only customers may request bookings".to_string(),
        ));
    }

    let booking = state
        .bookings
        .request_booking(
            actor.id,
            req.provider_id,
            req.service_ids,
            req.scheduled_at,
            req.notes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

async fn get_booking(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.bookings.get_booking(&actor, id).await?;
    Ok(Json(booking))
}

async fn apply_action(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .bookings
        .apply_action(&actor, id, req.action, req.reason, req.new_scheduled_at)
        .await?;
    Ok(Json(booking))
}

async fn delete_booking(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.bookings.delete_booking(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
