use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use super::dto::{CreateFoodRequest, DayQuery};
use super::repo::{self, FoodLog, NewFoodLog};
use super::services;
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::settings;
use crate::state::AppState;
use crate::summary::fasting;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/food", get(list_food))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/food", post(create_food))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
}

#[instrument(skip(state))]
pub async fn list_food(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(q): Query<DayQuery>,
) -> Result<Json<Vec<FoodLog>>, ApiError> {
    let day = q.day.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let logs = repo::fetch_for_day(&state.db, day).await?;
    Ok(Json(logs))
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Json(payload): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<FoodLog>), ApiError> {
    let now = OffsetDateTime::now_utc();
    let user_settings = settings::repo::fetch(&state.db).await?;

    if let Some(readout) = fasting::readout(user_settings.last_meal_end_at, now) {
        if readout.warning && !payload.override_fasting_warning {
            warn!(
                hours = readout.hours,
                remaining = readout.remaining,
                "entry inside fasting window refused"
            );
            return Err(ApiError::BadRequest(format!(
                "fasting window not reached ({:.1}h of {:.0}h): set override_fasting_warning to log anyway",
                readout.hours,
                fasting::FASTING_GOAL_HOURS
            )));
        }
    }

    let image_path = match payload.photo {
        Some(photo) => {
            let ext = services::photo_ext(&photo.filename).ok_or_else(|| {
                ApiError::BadRequest("only jpg/jpeg/png/webp photos are accepted".into())
            })?;
            if photo.data.len() > state.config.max_upload_bytes() {
                return Err(ApiError::BadRequest(format!(
                    "photo too large (> {}MB)",
                    state.config.max_upload_mb
                )));
            }
            Some(services::store_photo(&state, ext, photo.data.into_vec(), now).await?)
        }
        None => None,
    };

    let meal_type = payload
        .meal_type
        .unwrap_or_else(|| services::default_meal_type(payload.eaten_at));

    let log = repo::insert(
        &state.db,
        &NewFoodLog {
            eaten_at: payload.eaten_at,
            meal_type,
            image_path,
            refined_carbs: payload.refined_carbs,
            sugar: payload.sugar,
            veggies_first: payload.veggies_first,
            protein_enough: payload.protein_enough,
            self_rating: payload.self_rating,
            notes: payload.notes,
            meal_end_at: payload.meal_end_at,
        },
    )
    .await?;

    // A recorded meal end restarts the fasting clock.
    if let Some(meal_end_at) = log.meal_end_at {
        settings::repo::set_last_meal_end(&state.db, meal_end_at).await?;
    }

    info!(id = %log.id, meal_type = ?log.meal_type, "food logged");
    Ok((StatusCode::CREATED, Json(log)))
}
