use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::{
    CloseMaintenanceRequest, MaintenanceResponse, OpenMaintenanceRequest, PreviewScheduleRequest,
    PreviewScheduleResponse, RescheduleResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(open_maintenance))
        .route("/:id/close", post(close_maintenance))
        .route("/vehicle/:vehicle_id", get(vehicle_history))
        .route("/preview", post(preview_schedule))
}

async fn open_maintenance(
    State(state): State<AppState>,
    Json(request): Json<OpenMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.scheduler_config.clone());
    let response = controller.open(request).await?;
    Ok(Json(response))
}

async fn close_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CloseMaintenanceRequest>,
) -> Result<Json<ApiResponse<RescheduleResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.scheduler_config.clone());
    let response = controller.close(id, request).await?;
    Ok(Json(response))
}

async fn vehicle_history(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.scheduler_config.clone());
    let response = controller.history(vehicle_id).await?;
    Ok(Json(response))
}

async fn preview_schedule(
    State(state): State<AppState>,
    Json(request): Json<PreviewScheduleRequest>,
) -> Result<Json<PreviewScheduleResponse>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.scheduler_config.clone());
    let response = controller.preview(request).await?;
    Ok(Json(response))
}
