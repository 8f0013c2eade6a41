//! Rutas de la API
//!
//! Un router por recurso, anidados bajo su prefijo.

pub mod driver_routes;
pub mod vehicle_log_routes;
pub mod vehicle_routes;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub const SERVER_BANNER: &str = "Vehicle Registry Server";

/// Router completo de la aplicación con sus capas
pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let timeout = TimeoutLayer::new(state.config.request_timeout);

    Router::new()
        .route("/", get(banner))
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/vehicle-logs", vehicle_log_routes::create_vehicle_log_router())
        .layer(TraceLayer::new_for_http())
        .layer(timeout)
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

async fn banner() -> &'static str {
    SERVER_BANNER
}
