//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su enum de estado operativo.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado operativo del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    InShop,
    Inactive,
}

/// Vehículo de la flota - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    /// Placa única del vehículo
    pub plate: String,
    /// Afiliación a CEDIS; un vehículo puede no tener CEDIS asignado
    pub cedis_id: Option<Uuid>,
    pub odometer: Decimal,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Proyección mínima que consume el motor de scheduling
    pub fn scheduling_info(&self) -> crate::scheduler::VehicleInfo {
        crate::scheduler::VehicleInfo { id: self.id, cedis_id: self.cedis_id }
    }
}
