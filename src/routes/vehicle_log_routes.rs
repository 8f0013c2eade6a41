use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::VehicleLogController;
use crate::dto::vehicle_log_dto::{CreateVehicleLogRequest, UpdateVehicleLogRequest, VehicleLogQuery};
use crate::dto::MessageResponse;
use crate::middleware::validation::ValidatedJson;
use crate::models::VehicleLog;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_vehicle_log_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicle_logs).post(create_vehicle_log))
        .route(
            "/:id",
            get(get_vehicle_log)
                .put(update_vehicle_log)
                .delete(delete_vehicle_log),
        )
}

fn controller(state: &AppState) -> VehicleLogController {
    VehicleLogController::new(
        state.vehicle_logs.clone(),
        state.vehicles.clone(),
        state.drivers.clone(),
    )
}

fn log_not_found(raw_id: &str) -> AppError {
    not_found_error("Vehicle log ID", raw_id)
}

/// Un id no numérico no puede existir: se responde como ausente.
fn parse_id(raw_id: &str) -> Result<i64, AppError> {
    raw_id.trim().parse().map_err(|_| log_not_found(raw_id))
}

async fn create_vehicle_log(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateVehicleLogRequest>,
) -> Result<(StatusCode, Json<VehicleLog>), AppError> {
    let log = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn get_vehicle_log(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<VehicleLog>, AppError> {
    let id = parse_id(&raw_id)?;
    controller(&state)
        .read(id)
        .await?
        .map(Json)
        .ok_or_else(|| log_not_found(&raw_id))
}

async fn list_vehicle_logs(
    State(state): State<AppState>,
    Query(query): Query<VehicleLogQuery>,
) -> Result<Json<Vec<VehicleLog>>, AppError> {
    let filter = query.filter()?;
    let logs = controller(&state)
        .read_all(query.pagination(), &filter)
        .await?;
    Ok(Json(logs))
}

async fn update_vehicle_log(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleLogRequest>,
) -> Result<Json<VehicleLog>, AppError> {
    let id = parse_id(&raw_id)?;
    controller(&state)
        .update(id, request)
        .await?
        .map(Json)
        .ok_or_else(|| log_not_found(&raw_id))
}

async fn delete_vehicle_log(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&raw_id)?;
    if controller(&state).delete(id).await? {
        Ok(Json(MessageResponse::new(format!(
            "Vehicle log with ID {} deleted successfully.",
            id
        ))))
    } else {
        Err(log_not_found(&raw_id))
    }
}
