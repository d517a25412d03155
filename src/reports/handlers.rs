use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use time::{Date, Duration, OffsetDateTime};
use tracing::instrument;

use super::dto::{WeeklyQuery, WeeklyReport};
use super::services::weekly_totals;
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::food::repo::{day_bounds, FoodLog};
use crate::metrics::repo::DailyMetrics;
use crate::state::AppState;
use crate::summary::dto::SummaryResponse;
use crate::summary::rules::evaluate_day;
use crate::{food, metrics, summary};

pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/weekly", get(get_weekly_report))
}

/// Seven-day report ending on `end` (today by default). Records for the whole
/// window come from one metrics query and one food-log query; each day is
/// then evaluated in memory and its summary slot refreshed.
#[instrument(skip(state))]
pub async fn get_weekly_report(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(q): Query<WeeklyQuery>,
) -> Result<Json<WeeklyReport>, ApiError> {
    let end = q.end.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let start = end - Duration::days(6);
    let window: Vec<Date> = (0..7).map(|i| start + Duration::days(i)).collect();

    let metrics_rows = metrics::repo::fetch_range(&state.db, start, end).await?;
    let logs_rows =
        food::repo::fetch_between(&state.db, day_bounds(start).0, day_bounds(end).1).await?;

    let metrics_by_day: HashMap<Date, DailyMetrics> =
        metrics_rows.into_iter().map(|m| (m.day, m)).collect();
    let mut logs_by_day: HashMap<Date, Vec<FoodLog>> = HashMap::new();
    for log in logs_rows {
        logs_by_day.entry(log.eaten_at.date()).or_default().push(log);
    }

    let mut days = Vec::with_capacity(window.len());
    let mut colors = Vec::with_capacity(window.len());
    for day in &window {
        let eval = evaluate_day(
            metrics_by_day.get(day),
            logs_by_day.get(day).map(Vec::as_slice).unwrap_or_default(),
        );
        let row = summary::repo::upsert(&state.db, *day, &eval).await?;
        colors.push(eval.color);
        days.push(SummaryResponse::from_parts(row, eval));
    }

    let totals = weekly_totals(&window, &colors, &metrics_by_day);
    Ok(Json(WeeklyReport {
        start,
        end,
        days,
        totals,
    }))
}
