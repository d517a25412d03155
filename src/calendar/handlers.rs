use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use time::{Date, OffsetDateTime};
use tracing::instrument;

use super::dto::{CalendarCell, CalendarResponse, MonthQuery};
use super::grid::{month_grid, CalendarDay};
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::food::repo::{day_bounds, FoodLog};
use crate::metrics::repo::DailyMetrics;
use crate::state::AppState;
use crate::summary::rules::evaluate_day;
use crate::{food, metrics};

pub fn routes() -> Router<AppState> {
    Router::new().route("/calendar", get(get_calendar))
}

/// Colors a month grid from pre-fetched records: every in-grid day up to
/// `today` is evaluated in memory, future days stay uncolored. No storage
/// round-trips and no summary writes happen here.
pub fn project_colors(
    weeks: &[Vec<CalendarDay>],
    today: Date,
    metrics_by_day: &HashMap<Date, DailyMetrics>,
    logs_by_day: &HashMap<Date, Vec<FoodLog>>,
) -> Vec<Vec<CalendarCell>> {
    weeks
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| {
                    let color = if cell.day > today {
                        None
                    } else {
                        let eval = evaluate_day(
                            metrics_by_day.get(&cell.day),
                            logs_by_day
                                .get(&cell.day)
                                .map(Vec::as_slice)
                                .unwrap_or_default(),
                        );
                        Some(eval.color)
                    };
                    CalendarCell {
                        day: cell.day,
                        in_month: cell.in_month,
                        color,
                    }
                })
                .collect()
        })
        .collect()
}

#[instrument(skip(state))]
pub async fn get_calendar(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(q): Query<MonthQuery>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let today = OffsetDateTime::now_utc().date();
    let year = q.year.unwrap_or_else(|| today.year());
    let month = q.month.unwrap_or_else(|| u8::from(today.month()));

    let weeks = month_grid(year, month)?;
    let span_start = weeks[0][0].day;
    let span_end = weeks[weeks.len() - 1][6].day;

    // one query per record kind for the whole grid span
    let metrics_rows = metrics::repo::fetch_range(&state.db, span_start, span_end).await?;
    let logs_rows = food::repo::fetch_between(
        &state.db,
        day_bounds(span_start).0,
        day_bounds(span_end).1,
    )
    .await?;

    let metrics_by_day: HashMap<Date, DailyMetrics> =
        metrics_rows.into_iter().map(|m| (m.day, m)).collect();
    let mut logs_by_day: HashMap<Date, Vec<FoodLog>> = HashMap::new();
    for log in logs_rows {
        logs_by_day.entry(log.eaten_at.date()).or_default().push(log);
    }

    let cells = project_colors(&weeks, today, &metrics_by_day, &logs_by_day);
    Ok(Json(CalendarResponse {
        year,
        month,
        weeks: cells,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn red_glucose_metrics(day: Date) -> DailyMetrics {
        DailyMetrics {
            day,
            weight_kg: None,
            fasting_glucose_mmol_l: Some(8.2),
            post2h_glucose_mmol_l: None,
            waist_cm: None,
            sleep_hours: None,
            bp_systolic: None,
            bp_diastolic: None,
        }
    }

    #[test]
    fn future_days_stay_uncolored_and_past_days_are_evaluated() {
        let weeks = month_grid(2024, 2).expect("valid month");
        let today = date!(2024 - 02 - 15);

        let mut metrics_by_day = HashMap::new();
        metrics_by_day.insert(
            date!(2024 - 02 - 10),
            red_glucose_metrics(date!(2024 - 02 - 10)),
        );
        let logs_by_day = HashMap::new();

        let cells = project_colors(&weeks, today, &metrics_by_day, &logs_by_day);
        let by_day: HashMap<Date, CalendarCell> = cells
            .into_iter()
            .flatten()
            .map(|c| (c.day, c))
            .collect();

        // day with red glucose and nothing else
        assert_eq!(
            by_day[&date!(2024 - 02 - 10)].color,
            Some(crate::summary::rules::SummaryColor::Red)
        );
        // no data at all: both axes take their "not recorded" branch
        assert_eq!(
            by_day[&date!(2024 - 02 - 14)].color,
            Some(crate::summary::rules::SummaryColor::Yellow)
        );
        // leading days from January are in-grid and evaluated too
        assert_eq!(
            by_day[&date!(2024 - 01 - 29)].color,
            Some(crate::summary::rules::SummaryColor::Yellow)
        );
        assert!(!by_day[&date!(2024 - 01 - 29)].in_month);
        // strictly after today: unknown
        assert_eq!(by_day[&date!(2024 - 02 - 16)].color, None);
        assert_eq!(by_day[&date!(2024 - 03 - 03)].color, None);
        // today itself is evaluated
        assert!(by_day[&today].color.is_some());
    }
}
