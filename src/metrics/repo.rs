use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::Date;

/// One snapshot per calendar day, unique on `day`. Every value field is
/// independently optional; a missing value is NULL, never a sentinel zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DailyMetrics {
    pub day: Date,
    pub weight_kg: Option<f64>,
    pub fasting_glucose_mmol_l: Option<f64>,
    pub post2h_glucose_mmol_l: Option<f64>,
    pub waist_cm: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub bp_systolic: Option<i32>,
    pub bp_diastolic: Option<i32>,
}

const COLUMNS: &str = "day, weight_kg, fasting_glucose_mmol_l, post2h_glucose_mmol_l, \
                       waist_cm, sleep_hours, bp_systolic, bp_diastolic";

pub async fn fetch_by_day(db: &PgPool, day: Date) -> anyhow::Result<Option<DailyMetrics>> {
    let row = sqlx::query_as::<_, DailyMetrics>(&format!(
        "SELECT {COLUMNS} FROM daily_metrics WHERE day = $1"
    ))
    .bind(day)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// In-place upsert keyed by day: absent fields overwrite with NULL, matching
/// the metrics-entry form semantics.
pub async fn upsert(db: &PgPool, metrics: &DailyMetrics) -> anyhow::Result<DailyMetrics> {
    let row = sqlx::query_as::<_, DailyMetrics>(&format!(
        r#"
        INSERT INTO daily_metrics ({COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (day) DO UPDATE SET
            weight_kg = EXCLUDED.weight_kg,
            fasting_glucose_mmol_l = EXCLUDED.fasting_glucose_mmol_l,
            post2h_glucose_mmol_l = EXCLUDED.post2h_glucose_mmol_l,
            waist_cm = EXCLUDED.waist_cm,
            sleep_hours = EXCLUDED.sleep_hours,
            bp_systolic = EXCLUDED.bp_systolic,
            bp_diastolic = EXCLUDED.bp_diastolic,
            updated_at = now()
        RETURNING {COLUMNS}
        "#
    ))
    .bind(metrics.day)
    .bind(metrics.weight_kg)
    .bind(metrics.fasting_glucose_mmol_l)
    .bind(metrics.post2h_glucose_mmol_l)
    .bind(metrics.waist_cm)
    .bind(metrics.sleep_hours)
    .bind(metrics.bp_systolic)
    .bind(metrics.bp_diastolic)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn delete_by_day(db: &PgPool, day: Date) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM daily_metrics WHERE day = $1")
        .bind(day)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Single range query, ascending by day. Used by the calendar and weekly
/// aggregations to avoid per-day round-trips.
pub async fn fetch_range(db: &PgPool, start: Date, end: Date) -> anyhow::Result<Vec<DailyMetrics>> {
    let rows = sqlx::query_as::<_, DailyMetrics>(&format!(
        "SELECT {COLUMNS} FROM daily_metrics WHERE day >= $1 AND day <= $2 ORDER BY day ASC"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn fetch_recent(db: &PgPool, limit: i64) -> anyhow::Result<Vec<DailyMetrics>> {
    let rows = sqlx::query_as::<_, DailyMetrics>(&format!(
        "SELECT {COLUMNS} FROM daily_metrics ORDER BY day DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Last `days` calendar days ending at `today`, ascending, for charting.
pub async fn fetch_recent_series(
    db: &PgPool,
    today: Date,
    days: i64,
) -> anyhow::Result<Vec<DailyMetrics>> {
    let start = today - time::Duration::days(days - 1);
    fetch_range(db, start, today).await
}

/// Earliest day ever recorded with a weight value: the baseline for
/// lifetime weight-loss milestones.
pub async fn fetch_baseline_weight(db: &PgPool) -> anyhow::Result<Option<f64>> {
    let row = sqlx::query_scalar::<_, f64>(
        r#"
        SELECT weight_kg FROM daily_metrics
        WHERE weight_kg IS NOT NULL
        ORDER BY day ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(db)
    .await?;
    Ok(row)
}
