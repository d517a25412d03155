use serde::Serialize;
use time::Date;

use crate::metrics::repo::DailyMetrics;
use crate::summary::dto::SummaryResponse;
use crate::summary::fasting::FastingReadout;
use crate::summary::rules::SummaryColor;

#[derive(Debug, Serialize)]
pub struct Milestones {
    /// Lifetime green-day count across all evaluated days.
    pub green_days_total: usize,
    /// Largest whole week of green days reached, absent before the first.
    pub green_week_milestone: Option<i64>,
    /// Largest whole 5 kg lost from the baseline weight, absent below 5 kg.
    pub weight_loss_milestone_kg: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub today: Date,
    /// Yesterday's verdict, refreshed on read. Today is still in flight and
    /// gets no verdict here.
    pub yesterday: SummaryResponse,
    pub yesterday_color: SummaryColor,
    pub metrics_today: Option<DailyMetrics>,
    pub bmi: Option<f64>,
    pub goal_weight_kg: f64,
    pub goal_delta_kg: Option<f64>,
    /// Change against the earliest recorded weight, negative when losing.
    pub baseline_delta_kg: Option<f64>,
    /// Absent until a meal end has been recorded at least once.
    pub fasting: Option<FastingReadout>,
    pub milestones: Milestones,
    /// Last 30 calendar days of metrics, ascending, for the charts.
    pub recent_metrics: Vec<DailyMetrics>,
}
