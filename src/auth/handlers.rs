use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::dto::{AuthResponse, LoginRequest, OwnerResponse, RefreshRequest};
use crate::auth::jwt::{AuthUser, JwtKeys};
use crate::auth::password::verify_password;
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let owner = &state.config.owner;
    if payload.username != owner.username {
        warn!(username = %payload.username, "login unknown username");
        return Err(ApiError::Unauthorized);
    }
    if !verify_password(&payload.password, &owner.password_hash)? {
        warn!(username = %payload.username, "login invalid password");
        return Err(ApiError::Unauthorized);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_access(&owner.username)?;
    let refresh_token = keys.sign_refresh(&owner.username)?;

    info!(username = %owner.username, "owner logged in");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|_| ApiError::Unauthorized)?;

    let access_token = keys.sign_access(&claims.sub)?;
    let refresh_token = keys.sign_refresh(&claims.sub)?;

    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
    }))
}

#[instrument(skip(_state))]
pub async fn get_me(
    State(_state): State<AppState>,
    AuthUser(username): AuthUser,
) -> Json<OwnerResponse> {
    Json(OwnerResponse { username })
}
