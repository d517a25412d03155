use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::Date;
use tracing::instrument;

use super::dto::{MetricsUpsertRequest, RecentQuery};
use super::repo::{self, DailyMetrics};
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(list_metrics))
        .route(
            "/metrics/:day",
            get(get_metrics).put(upsert_metrics).delete(delete_metrics),
        )
}

#[instrument(skip(state))]
pub async fn list_metrics(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(q): Query<RecentQuery>,
) -> Result<Json<Vec<DailyMetrics>>, ApiError> {
    if q.limit <= 0 {
        return Err(ApiError::InvalidRange(format!(
            "limit must be positive, got {}",
            q.limit
        )));
    }
    let rows = repo::fetch_recent(&state.db, q.limit).await?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn get_metrics(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(day): Path<Date>,
) -> Result<Json<DailyMetrics>, ApiError> {
    let row = repo::fetch_by_day(&state.db, day)
        .await?
        .ok_or(ApiError::NotFound("metrics for day"))?;
    Ok(Json(row))
}

#[instrument(skip(state, payload))]
pub async fn upsert_metrics(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(day): Path<Date>,
    Json(payload): Json<MetricsUpsertRequest>,
) -> Result<Json<DailyMetrics>, ApiError> {
    let row = repo::upsert(
        &state.db,
        &DailyMetrics {
            day,
            weight_kg: payload.weight_kg,
            fasting_glucose_mmol_l: payload.fasting_glucose_mmol_l,
            post2h_glucose_mmol_l: payload.post2h_glucose_mmol_l,
            waist_cm: payload.waist_cm,
            sleep_hours: payload.sleep_hours,
            bp_systolic: payload.bp_systolic,
            bp_diastolic: payload.bp_diastolic,
        },
    )
    .await?;
    Ok(Json(row))
}

#[instrument(skip(state))]
pub async fn delete_metrics(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(day): Path<Date>,
) -> Result<StatusCode, ApiError> {
    if repo::delete_by_day(&state.db, day).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("metrics for day"))
    }
}
