use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use super::dto::UpdateSettingsRequest;
use super::repo::{self, UserSettings};
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_settings))
        .route("/settings", put(update_settings))
}

#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<UserSettings>, ApiError> {
    let settings = repo::fetch(&state.db).await?;
    Ok(Json(settings))
}

#[instrument(skip(state, payload))]
pub async fn update_settings(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<UserSettings>, ApiError> {
    if let Some(h) = payload.height_cm {
        if h <= 0.0 {
            return Err(ApiError::BadRequest("height_cm must be positive".into()));
        }
    }
    if let Some(g) = payload.goal_weight_kg {
        if g <= 0.0 {
            return Err(ApiError::BadRequest(
                "goal_weight_kg must be positive".into(),
            ));
        }
    }
    let settings =
        repo::update_profile(&state.db, payload.height_cm, payload.goal_weight_kg).await?;
    Ok(Json(settings))
}
