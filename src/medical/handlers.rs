use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{
    CreateLabMetricRequest, CreateLabReportRequest, CreateMedicationRequest, MedicalOverview,
    UpsertInventoryRequest,
};
use super::repo::{self, InventoryItem, LabMetric, LabReport, Medication};
use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::food::services::photo_ext;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/medical", get(get_overview))
        .route("/medical/medications", post(create_medication))
        .route("/medical/inventory", put(upsert_inventory))
        .route("/medical/lab-metrics", post(create_lab_metric))
        .route("/medical/reports", post(create_lab_report))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
}

/// Lab reports accept the photo formats plus pdf.
fn report_ext(filename: &str) -> Option<&'static str> {
    if filename.to_lowercase().ends_with(".pdf") {
        Some(".pdf")
    } else {
        photo_ext(filename)
    }
}

#[instrument(skip(state))]
pub async fn get_overview(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<MedicalOverview>, ApiError> {
    let medications = repo::fetch_recent_medications(&state.db, 50).await?;
    let inventory = repo::fetch_inventory(&state.db).await?;
    let lab_metrics = repo::fetch_recent_lab_metrics(&state.db, 50).await?;
    let reports = repo::fetch_recent_lab_reports(&state.db, 20).await?;
    Ok(Json(MedicalOverview {
        medications,
        inventory,
        lab_metrics,
        reports,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_medication(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Json(payload): Json<CreateMedicationRequest>,
) -> Result<(StatusCode, Json<Medication>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("medication name is required".into()));
    }
    let row = repo::insert_medication(
        &state.db,
        payload.name.trim(),
        payload.dose.as_deref(),
        payload.taken_at,
        payload.next_reminder_at,
    )
    .await?;
    info!(id = %row.id, name = %row.name, "medication logged");
    Ok((StatusCode::CREATED, Json(row)))
}

#[instrument(skip(state, payload))]
pub async fn upsert_inventory(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Json(payload): Json<UpsertInventoryRequest>,
) -> Result<Json<InventoryItem>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("medication name is required".into()));
    }
    if payload.remaining < 0 {
        return Err(ApiError::BadRequest(
            "remaining count cannot be negative".into(),
        ));
    }
    let row = repo::upsert_inventory(&state.db, payload.name.trim(), payload.remaining).await?;
    Ok(Json(row))
}

#[instrument(skip(state, payload))]
pub async fn create_lab_metric(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Json(payload): Json<CreateLabMetricRequest>,
) -> Result<(StatusCode, Json<LabMetric>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("metric name is required".into()));
    }
    let row = repo::insert_lab_metric(
        &state.db,
        payload.metric_date,
        payload.name.trim(),
        payload.value,
        payload.unit.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[instrument(skip(state, payload))]
pub async fn create_lab_report(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Json(payload): Json<CreateLabReportRequest>,
) -> Result<(StatusCode, Json<LabReport>), ApiError> {
    let image_path = match payload.file {
        Some(file) => {
            let ext = report_ext(&file.filename).ok_or_else(|| {
                ApiError::BadRequest("only jpg/jpeg/png/webp/pdf reports are accepted".into())
            })?;
            if file.data.len() > state.config.max_upload_bytes() {
                return Err(ApiError::BadRequest(format!(
                    "report file too large (> {}MB)",
                    state.config.max_upload_mb
                )));
            }
            let key = format!("labs/{}{}", Uuid::new_v4().simple(), ext);
            state
                .storage
                .put_object(&key, Bytes::from(file.data.into_vec()))
                .await?;
            Some(key)
        }
        None => None,
    };

    let row = repo::insert_lab_report(
        &state.db,
        payload.report_date,
        image_path.as_deref(),
        payload.notes.as_deref(),
    )
    .await?;
    info!(id = %row.id, "lab report stored");
    Ok((StatusCode::CREATED, Json(row)))
}
