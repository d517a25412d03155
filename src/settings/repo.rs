use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::info;

use crate::config::AppConfig;

/// The single subject-profile row (id = 1). `last_meal_end_at` is the
/// fasting clock's persisted scalar: the most recent recorded meal end.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct UserSettings {
    pub height_cm: f64,
    pub goal_weight_kg: f64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_meal_end_at: Option<OffsetDateTime>,
}

pub async fn fetch(db: &PgPool) -> anyhow::Result<UserSettings> {
    let settings = sqlx::query_as::<_, UserSettings>(
        r#"
        SELECT height_cm, goal_weight_kg, last_meal_end_at
        FROM user_settings
        WHERE id = 1
        "#,
    )
    .fetch_one(db)
    .await?;
    Ok(settings)
}

pub async fn update_profile(
    db: &PgPool,
    height_cm: Option<f64>,
    goal_weight_kg: Option<f64>,
) -> anyhow::Result<UserSettings> {
    let settings = sqlx::query_as::<_, UserSettings>(
        r#"
        UPDATE user_settings SET
            height_cm = COALESCE($1, height_cm),
            goal_weight_kg = COALESCE($2, goal_weight_kg),
            updated_at = now()
        WHERE id = 1
        RETURNING height_cm, goal_weight_kg, last_meal_end_at
        "#,
    )
    .bind(height_cm)
    .bind(goal_weight_kg)
    .fetch_one(db)
    .await?;
    Ok(settings)
}

pub async fn set_last_meal_end(db: &PgPool, at: OffsetDateTime) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE user_settings SET last_meal_end_at = $1, updated_at = now()
        WHERE id = 1
        "#,
    )
    .bind(at)
    .execute(db)
    .await?;
    Ok(())
}

/// Seeds the settings row from config defaults on first startup.
pub async fn ensure_subject_row(db: &PgPool, config: &AppConfig) -> anyhow::Result<()> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO user_settings (id, height_cm, goal_weight_kg)
        VALUES (1, $1, $2)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(config.height_cm)
    .bind(config.goal_weight_kg)
    .execute(db)
    .await?;
    if inserted.rows_affected() > 0 {
        info!(
            height_cm = config.height_cm,
            goal_weight_kg = config.goal_weight_kg,
            "seeded subject settings"
        );
    }
    Ok(())
}
