use serde::{Deserialize, Serialize};
use time::Date;

use super::services::WeeklyTotals;
use crate::summary::dto::SummaryResponse;

#[derive(Debug, Deserialize)]
pub struct WeeklyQuery {
    /// Last day of the window; defaults to today (UTC).
    pub end: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyReport {
    pub start: Date,
    pub end: Date,
    pub days: Vec<SummaryResponse>,
    #[serde(flatten)]
    pub totals: WeeklyTotals,
}
