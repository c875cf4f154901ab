use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Cedis;

/// Response de CEDIS con su configuración de capacidad
#[derive(Debug, Serialize)]
pub struct CedisResponse {
    pub id: Uuid,
    pub name: String,
    pub notification_email: Option<String>,
    pub daily_capacity: Option<i32>,
    pub workshop_group: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Cedis> for CedisResponse {
    fn from(cedis: Cedis) -> Self {
        Self {
            id: cedis.id,
            name: cedis.name,
            notification_email: cedis.notification_email,
            daily_capacity: cedis.daily_capacity,
            workshop_group: cedis.workshop_group,
            created_at: cedis.created_at,
        }
    }
}
