use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub height_cm: Option<f64>,
    pub goal_weight_kg: Option<f64>,
}
