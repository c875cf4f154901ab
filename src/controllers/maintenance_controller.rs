use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::maintenance_dto::{
    CloseMaintenanceRequest, MaintenanceResponse, OpenMaintenanceRequest, PreviewScheduleRequest,
    PreviewScheduleResponse, RescheduleResponse,
};
use crate::dto::ApiResponse;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::scheduler::{SchedulerConfig, TaskCategory};
use crate::services::scheduling_service::SchedulingService;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;

pub struct MaintenanceController {
    repository: MaintenanceRepository,
    service: SchedulingService,
}

impl MaintenanceController {
    pub fn new(pool: PgPool, scheduler_config: SchedulerConfig) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool.clone()),
            service: SchedulingService::new(pool, scheduler_config),
        }
    }

    pub async fn open(
        &self,
        request: OpenMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        request.validate()?;
        let start_date = validate_date(&request.start_date)
            .map_err(|_| AppError::BadRequest("start_date debe ser YYYY-MM-DD".to_string()))?;

        let odometer = match request.odometer_at_intake {
            Some(value) => Some(
                Decimal::from_f64_retain(value)
                    .ok_or_else(|| AppError::BadRequest("Odómetro inválido".to_string()))?,
            ),
            None => None,
        };

        let record = self
            .service
            .open_ticket(
                request.vehicle_id,
                request.kind,
                start_date,
                request.notes,
                odometer,
                None,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            record.into(),
            "Ticket de mantenimiento abierto".to_string(),
        ))
    }

    pub async fn close(
        &self,
        id: Uuid,
        request: CloseMaintenanceRequest,
    ) -> Result<ApiResponse<RescheduleResponse>, AppError> {
        request.validate()?;
        let end_date = validate_date(&request.end_date)
            .map_err(|_| AppError::BadRequest("end_date debe ser YYYY-MM-DD".to_string()))?;

        let tasks = parse_task_labels(request.tasks.as_deref().unwrap_or(&[]));

        let result = self
            .service
            .close_and_reschedule(id, end_date, &tasks, None)
            .await?;

        let response = RescheduleResponse {
            closed: result.closed.into(),
            next: result.next.into(),
        };
        Ok(ApiResponse::success_with_message(
            response,
            "Ticket cerrado; próxima visita programada".to_string(),
        ))
    }

    pub async fn history(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceResponse>, AppError> {
        let records = self.repository.history_for_vehicle(vehicle_id).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    pub async fn preview(
        &self,
        request: PreviewScheduleRequest,
    ) -> Result<PreviewScheduleResponse, AppError> {
        let tasks = parse_task_labels(request.tasks.as_deref().unwrap_or(&[]));
        let next_date = self.service.preview(request.vehicle_id, &tasks).await?;
        Ok(PreviewScheduleResponse { vehicle_id: request.vehicle_id, next_date })
    }
}

/// Etiquetas desconocidas se ignoran; solo las categorías con intervalo
/// nominal conocido afectan el cálculo
fn parse_task_labels(labels: &[String]) -> Vec<TaskCategory> {
    labels.iter().filter_map(|l| TaskCategory::parse(l)).collect()
}
