use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{MaintenanceKind, MaintenanceRecord};

/// Request para abrir un ticket de mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct OpenMaintenanceRequest {
    pub vehicle_id: Uuid,
    pub kind: MaintenanceKind,
    /// Fecha de inicio en formato YYYY-MM-DD
    pub start_date: String,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
    pub odometer_at_intake: Option<f64>,
}

/// Request para cerrar un ticket; dispara el reagendado preventivo
#[derive(Debug, Deserialize, Validate)]
pub struct CloseMaintenanceRequest {
    /// Fecha de fin en formato YYYY-MM-DD
    pub end_date: String,
    /// Etiquetas de tareas realizadas (aceite, frenos, llantas, bandas);
    /// las etiquetas desconocidas se ignoran
    pub tasks: Option<Vec<String>>,
}

/// Request para previsualizar la próxima fecha sin escribir
#[derive(Debug, Deserialize)]
pub struct PreviewScheduleRequest {
    pub vehicle_id: Uuid,
    pub tasks: Option<Vec<String>>,
}

/// Response de registro de mantenimiento
#[derive(Debug, Serialize)]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub cedis_id: Option<Uuid>,
    pub kind: MaintenanceKind,
    pub notes: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i64>,
    pub reserved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MaintenanceRecord> for MaintenanceResponse {
    fn from(record: MaintenanceRecord) -> Self {
        let duration_days = record.duration_days();
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            cedis_id: record.cedis_id,
            kind: record.kind,
            notes: record.notes,
            start_date: record.start_date,
            end_date: record.end_date,
            duration_days,
            reserved: record.reserved,
            created_at: record.created_at,
        }
    }
}

/// Response del cierre con reagendado
#[derive(Debug, Serialize)]
pub struct RescheduleResponse {
    pub closed: MaintenanceResponse,
    pub next: MaintenanceResponse,
}

/// Response de la previsualización
#[derive(Debug, Serialize)]
pub struct PreviewScheduleResponse {
    pub vehicle_id: Uuid,
    pub next_date: NaiveDate,
}
