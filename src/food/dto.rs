use serde::Deserialize;
use time::{Date, OffsetDateTime};

use super::repo::{MealType, SelfRating};

#[derive(Debug, Deserialize)]
pub struct PhotoUpload {
    pub filename: String,
    pub data: serde_bytes::ByteBuf,
}

#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    #[serde(with = "time::serde::rfc3339")]
    pub eaten_at: OffsetDateTime,
    /// Defaults by time of day when omitted.
    pub meal_type: Option<MealType>,
    #[serde(default)]
    pub refined_carbs: bool,
    #[serde(default)]
    pub sugar: bool,
    #[serde(default)]
    pub veggies_first: bool,
    #[serde(default)]
    pub protein_enough: bool,
    pub self_rating: SelfRating,
    pub notes: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub meal_end_at: Option<OffsetDateTime>,
    /// The fasting guard refuses entries inside the 16-hour window unless
    /// this is set.
    #[serde(default)]
    pub override_fasting_warning: bool,
    pub photo: Option<PhotoUpload>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub day: Option<Date>,
}
