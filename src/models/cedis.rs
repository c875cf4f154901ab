//! Modelo de CEDIS
//!
//! Un CEDIS es un centro de distribución regional. Algunos CEDIS comparten
//! taller físico y por eso comparten pool de capacidad (columna
//! workshop_group); la capacidad diaria individual es opcional y cae al
//! default de configuración cuando es NULL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// CEDIS - mapea a la tabla cedis
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cedis {
    pub id: Uuid,
    /// Nombre único del CEDIS
    pub name: String,
    pub notification_email: Option<String>,
    /// Capacidad de intake diaria; NULL usa el default de configuración (1)
    pub daily_capacity: Option<i32>,
    /// Nombre del grupo de taller compartido, si aplica
    pub workshop_group: Option<String>,
    pub created_at: DateTime<Utc>,
}
