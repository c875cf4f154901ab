use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Vehicle, VehicleStatus};
use crate::utils::validation::validate_plate;

/// Request para registrar un vehículo en la flota
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_plate")]
    pub plate: String,

    pub cedis_id: Option<Uuid>,

    #[validate(range(min = 0.0))]
    pub odometer: Option<f64>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub plate: String,
    pub cedis_id: Option<Uuid>,
    pub odometer: String,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate,
            cedis_id: vehicle.cedis_id,
            odometer: vehicle.odometer.to_string(),
            status: vehicle.status,
            created_at: vehicle.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(plate: &str) -> CreateVehicleRequest {
        CreateVehicleRequest { plate: plate.to_string(), cedis_id: None, odometer: None }
    }

    #[test]
    fn test_plate_format_is_enforced_on_create() {
        assert!(request("AB-123-CD").validate().is_ok());
        assert!(request("AB").validate().is_err());
        assert!(request("ABCDE-FGHIJ-KLMNO").validate().is_err());
    }
}

