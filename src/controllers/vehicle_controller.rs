use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::dto::ApiResponse;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self { repository: VehicleRepository::new(pool) }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if self.repository.plate_exists(&request.plate).await? {
            return Err(AppError::Conflict("La placa ya está registrada".to_string()));
        }

        let odometer = Decimal::from_f64_retain(request.odometer.unwrap_or(0.0))
            .ok_or_else(|| AppError::BadRequest("Odómetro inválido".to_string()))?;

        let vehicle = self
            .repository
            .create(request.plate, request.cedis_id, odometer)
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_all().await?;
        Ok(vehicles.into_iter().map(Into::into).collect())
    }
}
