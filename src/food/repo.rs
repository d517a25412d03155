use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "meal_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "self_rating", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SelfRating {
    Safe,
    Risk,
    Danger,
}

/// Append-only food-log entry. There is no update path: a logged meal is
/// immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FoodLog {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub eaten_at: OffsetDateTime,
    pub meal_type: MealType,
    pub image_path: Option<String>,
    pub refined_carbs: bool,
    pub sugar: bool,
    pub veggies_first: bool,
    pub protein_enough: bool,
    pub self_rating: SelfRating,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub meal_end_at: Option<OffsetDateTime>,
}

const COLUMNS: &str = "id, eaten_at, meal_type, image_path, refined_carbs, sugar, \
                       veggies_first, protein_enough, self_rating, notes, meal_end_at";

pub struct NewFoodLog {
    pub eaten_at: OffsetDateTime,
    pub meal_type: MealType,
    pub image_path: Option<String>,
    pub refined_carbs: bool,
    pub sugar: bool,
    pub veggies_first: bool,
    pub protein_enough: bool,
    pub self_rating: SelfRating,
    pub notes: Option<String>,
    pub meal_end_at: Option<OffsetDateTime>,
}

pub async fn insert(db: &PgPool, new: &NewFoodLog) -> anyhow::Result<FoodLog> {
    let row = sqlx::query_as::<_, FoodLog>(&format!(
        r#"
        INSERT INTO food_logs ({COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.eaten_at)
    .bind(new.meal_type)
    .bind(new.image_path.as_deref())
    .bind(new.refined_carbs)
    .bind(new.sugar)
    .bind(new.veggies_first)
    .bind(new.protein_enough)
    .bind(new.self_rating)
    .bind(new.notes.as_deref())
    .bind(new.meal_end_at)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Half-open UTC bounds of a calendar day: `[00:00, next day 00:00)`.
pub fn day_bounds(day: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = day.midnight().assume_utc();
    (start, start + Duration::days(1))
}

/// Single range query ordered by `eaten_at`; `end` is exclusive. Used by
/// the calendar and weekly aggregations to avoid per-day round-trips.
pub async fn fetch_between(
    db: &PgPool,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<Vec<FoodLog>> {
    let rows = sqlx::query_as::<_, FoodLog>(&format!(
        "SELECT {COLUMNS} FROM food_logs WHERE eaten_at >= $1 AND eaten_at < $2 ORDER BY eaten_at ASC"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn fetch_for_day(db: &PgPool, day: Date) -> anyhow::Result<Vec<FoodLog>> {
    let (start, end) = day_bounds(day);
    fetch_between(db, start, end).await
}
