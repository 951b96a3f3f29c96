use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;
use pitstop_booking::{Actor, ActorRole};

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

fn parse_role(role: &str) -> Option<ActorRole> {
    match role {
        "CUSTOMER" => Some(ActorRole::Customer),
        "PROVIDER" => Some(ActorRole::Provider),
        "ADMIN" => Some(ActorRole::Admin),
        "SUPER_ADMIN" => Some(ActorRole::SuperAdmin),
        _ => None,
    }
}

// ============================================================================
// Authentication Middleware
// ============================================================================

/// Decodes the bearer token and injects an explicit `Actor` into the
/// request extensions. Handlers never reach into the session themselves;
/// the domain core only ever sees the extracted actor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract token from Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Decode and validate JWT
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // 3. Resolve the actor: known role, uuid subject
    let role = parse_role(&token_data.claims.role).ok_or(StatusCode::FORBIDDEN)?;
    let id = Uuid::parse_str(&token_data.claims.sub).map_err(|_| StatusCode::UNAUTHORIZED)?;

    // 4. Inject into request extensions
    req.extensions_mut().insert(Actor { role, id });

    Ok(next.run(req).await)
}
