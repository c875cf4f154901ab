use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::cedis_controller::CedisController;
use crate::dto::cedis_dto::CedisResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_cedis_router() -> Router<AppState> {
    Router::new().route("/", get(list_cedis))
}

async fn list_cedis(
    State(state): State<AppState>,
) -> Result<Json<Vec<CedisResponse>>, AppError> {
    let controller = CedisController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}
