use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Vehicle, VehicleStatus};
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        plate: String,
        cedis_id: Option<Uuid>,
        odometer: Decimal,
    ) -> Result<Vehicle, AppError> {
        let id = Uuid::new_v4();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate, cedis_id, odometer, status, created_at)
            VALUES ($1, $2, $3, $4, 'active', $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plate)
        .bind(cedis_id)
        .bind(odometer)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    pub async fn plate_exists(&self, plate: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1)")
                .bind(plate)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Recalcular el estado operativo del vehículo a partir de sus registros
    /// abiertos. Las reservaciones futuras del scheduler (reserved = true)
    /// no cuentan como "en taller".
    pub async fn refresh_status(&self, vehicle_id: Uuid) -> Result<VehicleStatus, AppError> {
        let open_now: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM maintenance_records
            WHERE vehicle_id = $1 AND end_date IS NULL AND reserved = FALSE
            "#,
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        let status = if open_now.0 > 0 { VehicleStatus::InShop } else { VehicleStatus::Active };

        sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1 AND status <> 'inactive'")
            .bind(vehicle_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(status)
    }
}
