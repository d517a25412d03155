use serde::Serialize;
use time::{Date, OffsetDateTime};

use super::repo::DailySummary;
use super::rules::{DayEvaluation, SummaryColor};

/// API shape of a day's verdict: reasons as the ordered list, not the
/// persisted bullet text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResponse {
    pub day: Date,
    pub color: SummaryColor,
    pub score: i32,
    pub reasons: Vec<String>,
    pub commentary: String,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl SummaryResponse {
    pub fn from_parts(row: DailySummary, eval: DayEvaluation) -> Self {
        Self {
            day: row.day,
            color: row.color,
            score: row.score,
            reasons: eval.reasons,
            commentary: row.commentary,
            updated_at: row.updated_at,
        }
    }
}
