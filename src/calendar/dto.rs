use serde::{Deserialize, Serialize};
use time::Date;

use crate::summary::rules::SummaryColor;

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

/// `color` is absent for future days (not yet evaluable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub day: Date,
    pub in_month: bool,
    pub color: Option<SummaryColor>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u8,
    pub weeks: Vec<Vec<CalendarCell>>,
}
