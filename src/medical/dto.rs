use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::repo::{InventoryItem, LabMetric, LabReport, Medication};

#[derive(Debug, Deserialize)]
pub struct CreateMedicationRequest {
    pub name: String,
    pub dose: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub taken_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub next_reminder_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertInventoryRequest {
    pub name: String,
    pub remaining: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateLabMetricRequest {
    pub metric_date: Date,
    pub name: String,
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportUpload {
    pub filename: String,
    pub data: serde_bytes::ByteBuf,
}

#[derive(Debug, Deserialize)]
pub struct CreateLabReportRequest {
    pub report_date: Option<Date>,
    pub notes: Option<String>,
    pub file: Option<ReportUpload>,
}

#[derive(Debug, Serialize)]
pub struct MedicalOverview {
    pub medications: Vec<Medication>,
    pub inventory: Vec<InventoryItem>,
    pub lab_metrics: Vec<LabMetric>,
    pub reports: Vec<LabReport>,
}
