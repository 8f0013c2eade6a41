use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::dto::MessageResponse;
use crate::middleware::validation::ValidatedJson;
use crate::models::pagination::PageQuery;
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:number",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.vehicles.clone())
}

async fn create_vehicle(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let vehicle = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    controller(&state)
        .read(&number)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Vehicle number", &number))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = controller(&state).read_all(query.pagination()).await?;
    Ok(Json(vehicles))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(number): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    controller(&state)
        .update(&number, request)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Vehicle number", &number))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if controller(&state).delete(&number).await? {
        Ok(Json(MessageResponse::new(format!(
            "Vehicle with number {} deleted successfully.",
            number
        ))))
    } else {
        Err(not_found_error("Vehicle number", &number))
    }
}
