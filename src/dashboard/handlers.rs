use axum::{extract::State, routing::get, Json, Router};
use time::{Duration, OffsetDateTime};
use tracing::instrument;

use super::dto::{DashboardResponse, Milestones};
use super::stats;
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::summary::dto::SummaryResponse;
use crate::summary::rules::SummaryColor;
use crate::{metrics, settings, summary};

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// Landing-page aggregate: yesterday's verdict, today's raw numbers, the
/// fasting clock and the lifetime milestones in one response.
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();
    let today = now.date();
    let yesterday = today - Duration::days(1);

    let (row, eval) = summary::repo::get_or_refresh(&state.db, yesterday).await?;
    let metrics_today = metrics::repo::fetch_by_day(&state.db, today).await?;
    let profile = settings::repo::fetch(&state.db).await?;

    let current_weight = metrics_today.as_ref().and_then(|m| m.weight_kg);
    let bmi = current_weight.map(|w| stats::bmi(w, profile.height_cm));
    let goal_delta_kg = current_weight.map(|w| stats::goal_delta(w, profile.goal_weight_kg));

    let baseline = metrics::repo::fetch_baseline_weight(&state.db).await?;
    let baseline_delta_kg = match (baseline, current_weight) {
        (Some(b), Some(w)) => Some(w - b),
        _ => None,
    };
    let weight_loss_milestone_kg = match (baseline, current_weight) {
        (Some(b), Some(w)) => stats::weight_loss_milestone(b, w),
        _ => None,
    };

    let colors = summary::repo::fetch_all_colors(&state.db).await?;
    let green_days_total = colors
        .iter()
        .filter(|c| **c == SummaryColor::Green)
        .count();
    let green_week_milestone = stats::green_streak_milestone(green_days_total as i64);

    let fasting = summary::fasting::readout(profile.last_meal_end_at, now);
    let recent_metrics = metrics::repo::fetch_recent_series(&state.db, today, 30).await?;

    Ok(Json(DashboardResponse {
        today,
        yesterday_color: row.color,
        yesterday: SummaryResponse::from_parts(row, eval),
        metrics_today,
        bmi,
        goal_weight_kg: profile.goal_weight_kg,
        goal_delta_kg,
        baseline_delta_kg,
        fasting,
        milestones: Milestones {
            green_days_total,
            green_week_milestone,
            weight_loss_milestone_kg,
        },
        recent_metrics,
    }))
}
