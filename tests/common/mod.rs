#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use vehicle_registry::config::EnvironmentConfig;
use vehicle_registry::repositories::InMemoryRegistry;
use vehicle_registry::routes::create_app_router;
use vehicle_registry::state::AppState;

/// Router completo sobre el registro en memoria, con las mismas capas que
/// usa `main.rs`.
pub fn build_test_app(registry: InMemoryRegistry) -> Router {
    let state = AppState::in_memory(EnvironmentConfig::default(), registry);
    create_app_router(state)
}

/// Envía una request y devuelve el status y el cuerpo (JSON o texto plano).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Registra el vehículo VIN-123 y el conductor D123456.
pub async fn seed(app: &Router) {
    let (status, _) = post(
        app,
        "/vehicles",
        json!({ "number": "VIN-123", "brand": "Hyundai", "model": "Elantra" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post(
        app,
        "/drivers",
        json!({ "licenseId": "D123456", "firstName": "John", "surname": "Doe" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

pub fn log_body(vehicle: &str, driver: &str, log_type: &str, mileage: f64) -> Value {
    json!({
        "vehicleNumber": vehicle,
        "driverLicenseId": driver,
        "logType": log_type,
        "mileageInKilometers": mileage
    })
}
