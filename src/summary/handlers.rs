use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use time::Date;
use tracing::instrument;

use super::dto::SummaryResponse;
use super::repo;
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/summary/:day", get(get_summary))
}

/// Reads are refreshes: the verdict is recomputed from the day's current
/// records and the cached row overwritten before it is returned.
#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(day): Path<Date>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let (row, eval) = repo::get_or_refresh(&state.db, day).await?;
    Ok(Json(SummaryResponse::from_parts(row, eval)))
}
