//! Modelo de MaintenanceRecord
//!
//! Un registro de mantenimiento pertenece a exactamente un vehículo y
//! opcionalmente a un CEDIS. end_date en NULL significa que el ticket sigue
//! abierto (vehículo en taller). Cerrar un registro es el disparador que
//! produce el siguiente registro PREVENTIVO con fecha futura.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de mantenimiento - mapea al ENUM maintenance_kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "maintenance_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceKind {
    /// Servicio de rutina programado
    Preventive,
    /// Reparación no planeada tras una falla
    Corrective,
}

/// Registro de mantenimiento - mapea a la tabla maintenance_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub cedis_id: Option<Uuid>,
    pub kind: MaintenanceKind,
    pub notes: Option<String>,
    pub start_date: NaiveDate,
    /// NULL mientras el ticket está abierto
    pub end_date: Option<NaiveDate>,
    pub odometer_at_intake: Option<Decimal>,
    /// Marca el registro como reservación generada por el scheduler
    pub reserved: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }

    /// Duración derivada en días; indefinida mientras el ticket está abierto
    pub fn duration_days(&self) -> Option<i64> {
        self.end_date.map(|end| (end - self.start_date).num_days())
    }

    /// Proyección hacia el motor de scheduling
    pub fn history_entry(&self) -> crate::scheduler::HistoryEntry {
        crate::scheduler::HistoryEntry {
            kind: self.kind,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
