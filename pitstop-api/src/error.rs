use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use pitstop_booking::{BookingError, LifecycleError};
use pitstop_schedule::ScheduleError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    UnprocessableError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::UnprocessableError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match &err {
            BookingError::SlotUnavailable | BookingError::SlotFull => {
                AppError::UnprocessableError(err.to_string())
            }
            BookingError::UnknownService(_) | BookingError::Price(_) => {
                AppError::ValidationError(err.to_string())
            }
            BookingError::Lifecycle(LifecycleError::InvalidTransition { .. }) => {
                AppError::ConflictError(err.to_string())
            }
            BookingError::Lifecycle(_) => AppError::ValidationError(err.to_string()),
            BookingError::Unauthorized(_) => AppError::AuthorizationError(err.to_string()),
            BookingError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            BookingError::ConcurrentModification(_) => AppError::ConflictError(err.to_string()),
            BookingError::Infrastructure(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
