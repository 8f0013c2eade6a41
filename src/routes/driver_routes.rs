use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::DriverController;
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::dto::MessageResponse;
use crate::middleware::validation::ValidatedJson;
use crate::models::pagination::PageQuery;
use crate::models::Driver;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route(
            "/:license_id",
            get(get_driver).put(update_driver).delete(delete_driver),
        )
}

fn controller(state: &AppState) -> DriverController {
    DriverController::new(state.drivers.clone())
}

async fn create_driver(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDriverRequest>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    let driver = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(license_id): Path<String>,
) -> Result<Json<Driver>, AppError> {
    controller(&state)
        .read(&license_id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Driver license ID", &license_id))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Driver>>, AppError> {
    let drivers = controller(&state).read_all(query.pagination()).await?;
    Ok(Json(drivers))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(license_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    controller(&state)
        .update(&license_id, request)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Driver license ID", &license_id))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(license_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if controller(&state).delete(&license_id).await? {
        Ok(Json(MessageResponse::new(format!(
            "Driver with license ID {} deleted successfully.",
            license_id
        ))))
    } else {
        Err(not_found_error("Driver license ID", &license_id))
    }
}
