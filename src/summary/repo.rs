use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

use super::rules::{self, DayEvaluation, SummaryColor};
use crate::{food, metrics};

/// Persisted daily verdict. A recomputable cache, not a ledger: exactly one
/// row per day, overwritten in full on every refresh. `reasons` is stored
/// as the rendered bullet list the original views consumed.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DailySummary {
    pub day: Date,
    pub color: SummaryColor,
    pub score: i32,
    pub reasons: String,
    pub commentary: String,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub fn render_reasons(reasons: &[String]) -> String {
    reasons
        .iter()
        .map(|r| format!("- {r}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Evaluates a day from the current underlying records: one exact-day
/// metrics fetch plus one day-bounded food-log fetch.
pub async fn evaluate_from_store(db: &PgPool, day: Date) -> anyhow::Result<DayEvaluation> {
    let day_metrics = metrics::repo::fetch_by_day(db, day).await?;
    let logs = food::repo::fetch_for_day(db, day).await?;
    Ok(rules::evaluate_day(day_metrics.as_ref(), &logs))
}

pub async fn upsert(db: &PgPool, day: Date, eval: &DayEvaluation) -> anyhow::Result<DailySummary> {
    let row = sqlx::query_as::<_, DailySummary>(
        r#"
        INSERT INTO daily_summary (day, color, score, reasons, commentary)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (day) DO UPDATE SET
            color = EXCLUDED.color,
            score = EXCLUDED.score,
            reasons = EXCLUDED.reasons,
            commentary = EXCLUDED.commentary,
            updated_at = now()
        RETURNING day, color, score, reasons, commentary, updated_at
        "#,
    )
    .bind(day)
    .bind(eval.color)
    .bind(eval.score)
    .bind(render_reasons(&eval.reasons))
    .bind(&eval.commentary)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Unconditional cache refresh: always recomputes from current data, then
/// writes the day's slot. Callers pay the recomputation on every read and
/// in exchange never see a stale verdict.
pub async fn get_or_refresh(db: &PgPool, day: Date) -> anyhow::Result<(DailySummary, DayEvaluation)> {
    let eval = evaluate_from_store(db, day).await?;
    let row = upsert(db, day, &eval).await?;
    Ok((row, eval))
}

/// Every color ever persisted, for lifetime tallies (green-streak milestones).
pub async fn fetch_all_colors(db: &PgPool) -> anyhow::Result<Vec<SummaryColor>> {
    let colors = sqlx::query_scalar::<_, SummaryColor>("SELECT color FROM daily_summary")
        .fetch_all(db)
        .await?;
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_render_as_bullet_lines() {
        let reasons = vec!["no fasting glucose recorded".to_string(), "diet: risk items present".to_string()];
        assert_eq!(
            render_reasons(&reasons),
            "- no fasting glucose recorded\n- diet: risk items present"
        );
        assert_eq!(render_reasons(&[]), "");
    }
}
