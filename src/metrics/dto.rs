use serde::Deserialize;

/// Body for `PUT /metrics/:day`. Fields left out overwrite with NULL: the
/// day's snapshot is replaced wholesale, not patched.
#[derive(Debug, Deserialize)]
pub struct MetricsUpsertRequest {
    pub weight_kg: Option<f64>,
    pub fasting_glucose_mmol_l: Option<f64>,
    pub post2h_glucose_mmol_l: Option<f64>,
    pub waist_cm: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub bp_systolic: Option<i32>,
    pub bp_diastolic: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    120
}
