use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dose: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub taken_at: OffsetDateTime,
    /// Stored for the client to display; no scheduling happens server-side.
    #[serde(with = "time::serde::rfc3339::option")]
    pub next_reminder_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct InventoryItem {
    pub name: String,
    pub remaining: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LabMetric {
    pub id: Uuid,
    pub metric_date: Date,
    pub name: String,
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LabReport {
    pub id: Uuid,
    pub report_date: Option<Date>,
    pub image_path: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn insert_medication(
    db: &PgPool,
    name: &str,
    dose: Option<&str>,
    taken_at: OffsetDateTime,
    next_reminder_at: Option<OffsetDateTime>,
) -> anyhow::Result<Medication> {
    let row = sqlx::query_as::<_, Medication>(
        r#"
        INSERT INTO medications (id, name, dose, taken_at, next_reminder_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, dose, taken_at, next_reminder_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(dose)
    .bind(taken_at)
    .bind(next_reminder_at)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn fetch_recent_medications(db: &PgPool, limit: i64) -> anyhow::Result<Vec<Medication>> {
    let rows = sqlx::query_as::<_, Medication>(
        r#"
        SELECT id, name, dose, taken_at, next_reminder_at
        FROM medications
        ORDER BY taken_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Keyed by medication name; setting a count replaces the previous one.
pub async fn upsert_inventory(
    db: &PgPool,
    name: &str,
    remaining: i32,
) -> anyhow::Result<InventoryItem> {
    let row = sqlx::query_as::<_, InventoryItem>(
        r#"
        INSERT INTO medication_inventory (name, remaining)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET
            remaining = EXCLUDED.remaining,
            updated_at = now()
        RETURNING name, remaining
        "#,
    )
    .bind(name)
    .bind(remaining)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn fetch_inventory(db: &PgPool) -> anyhow::Result<Vec<InventoryItem>> {
    let rows = sqlx::query_as::<_, InventoryItem>(
        "SELECT name, remaining FROM medication_inventory ORDER BY name ASC",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_lab_metric(
    db: &PgPool,
    metric_date: Date,
    name: &str,
    value: f64,
    unit: Option<&str>,
) -> anyhow::Result<LabMetric> {
    let row = sqlx::query_as::<_, LabMetric>(
        r#"
        INSERT INTO lab_metrics (id, metric_date, name, value, unit)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, metric_date, name, value, unit
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(metric_date)
    .bind(name)
    .bind(value)
    .bind(unit)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn fetch_recent_lab_metrics(db: &PgPool, limit: i64) -> anyhow::Result<Vec<LabMetric>> {
    let rows = sqlx::query_as::<_, LabMetric>(
        r#"
        SELECT id, metric_date, name, value, unit
        FROM lab_metrics
        ORDER BY metric_date DESC, created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_lab_report(
    db: &PgPool,
    report_date: Option<Date>,
    image_path: Option<&str>,
    notes: Option<&str>,
) -> anyhow::Result<LabReport> {
    let row = sqlx::query_as::<_, LabReport>(
        r#"
        INSERT INTO lab_reports (id, report_date, image_path, notes)
        VALUES ($1, $2, $3, $4)
        RETURNING id, report_date, image_path, notes, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(report_date)
    .bind(image_path)
    .bind(notes)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn fetch_recent_lab_reports(db: &PgPool, limit: i64) -> anyhow::Result<Vec<LabReport>> {
    let rows = sqlx::query_as::<_, LabReport>(
        r#"
        SELECT id, report_date, image_path, notes, created_at
        FROM lab_reports
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
