mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{build_test_app, delete, get, log_body, post, put, seed};
use vehicle_registry::repositories::InMemoryRegistry;

#[tokio::test]
async fn test_banner() {
    let app = build_test_app(InMemoryRegistry::new());
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Vehicle Registry Server"));
}

#[tokio::test]
async fn test_vehicle_crud() {
    let app = build_test_app(InMemoryRegistry::new());
    seed(&app).await;

    let (status, body) = post(
        &app,
        "/vehicles",
        json!({ "number": "VIN-123", "brand": "Ford", "model": "Focus" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["type"], "DuplicateError");
    assert_eq!(body["details"]["detail"], "A vehicle with this number already exists.");

    let (status, body) = put(
        &app,
        "/vehicles/VIN-123",
        json!({ "brand": "Ford", "model": "Focus" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "number": "VIN-123", "brand": "Ford", "model": "Focus" }));

    let (status, body) = get(&app, "/vehicles?limit=abc&page=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, _) = delete(&app, "/vehicles/VIN-123").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/vehicles/VIN-123").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "NotFoundError");
    assert_eq!(body["message"], "Vehicle number not found: VIN-123");
}

#[tokio::test]
async fn test_driver_validation() {
    let app = build_test_app(InMemoryRegistry::new());

    let (status, body) = post(
        &app,
        "/drivers",
        json!({ "licenseId": "D1 23", "firstName": "John", "surname": "Doe" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "ValidationError");
    assert!(body["details"].as_array().is_some_and(|issues| !issues.is_empty()));

    let (status, body) = post(
        &app,
        "/drivers",
        json!({
            "licenseId": "D123456",
            "firstName": "John",
            "surname": "Doe",
            "secondSurname": "Smith"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["secondSurname"], "Smith");
    assert!(body.get("secondName").is_none());

    let (status, body) = get(&app, "/drivers/D123456").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["licenseId"], "D123456");
}

#[tokio::test]
async fn test_vehicle_log_scenario() {
    let registry = InMemoryRegistry::new();
    let app = build_test_app(registry.clone());
    seed(&app).await;

    let (status, entry) = post(&app, "/vehicle-logs", log_body("VIN-123", "D123456", "entry", 1000.0)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["vehicle"]["number"], "VIN-123");
    assert_eq!(entry["driver"]["licenseId"], "D123456");
    assert_eq!(entry["logType"], "entry");
    assert_eq!(entry["mileageInKilometers"].as_f64(), Some(1000.0));
    assert!(entry["timestamp"].is_string());

    let (status, body) = post(&app, "/vehicle-logs", log_body("VIN-123", "D123456", "entry", 1100.0)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["type"], "IncorrectValueError");

    let (status, exit) = post(&app, "/vehicle-logs", log_body("VIN-123", "D123456", "exit", 1100.0)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&app, "/vehicle-logs", log_body("VIN-123", "D123456", "entry", 50.0)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INCORRECT_VALUE");

    let (status, body) = post(&app, "/vehicle-logs", log_body("VIN-999", "D123456", "entry", 10.0)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "ReferenceNotFoundError");
    assert_eq!(body["details"]["detail"], "A vehicle with this number was not found.");

    let (status, body) = post(&app, "/vehicle-logs", log_body("VIN-123", "D123456", "parked", 10.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "ValidationError");

    let (status, body) = post(&app, "/vehicle-logs", log_body("VIN-123", "D123456", "entry", -1.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "ValidationError");

    assert_eq!(registry.log_count().await, 2);

    let (status, body) = get(&app, "/vehicle-logs?vehicleNumber=VIN-123&driverLicenseId=").await;
    assert_eq!(status, StatusCode::OK);
    let logs = body.as_array().cloned().unwrap_or_default();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["id"], exit["id"]);
    assert_eq!(logs[1]["id"], entry["id"]);

    let (status, body) = get(&app, "/vehicle-logs?limit=1&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], entry["id"]);

    let (status, body) = get(&app, "/vehicle-logs?date=27-11-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "ValidationError");
}

#[tokio::test]
async fn test_vehicle_log_by_id() {
    let app = build_test_app(InMemoryRegistry::new());
    seed(&app).await;

    let (_, entry) = post(&app, "/vehicle-logs", log_body("VIN-123", "D123456", "entry", 1000.0)).await;
    let uri = format!("/vehicle-logs/{}", entry["id"]);

    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, entry);

    let (status, body) = put(&app, &uri, json!({ "logType": "exit", "mileageInKilometers": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logType"], "exit");
    assert_eq!(body["mileageInKilometers"].as_f64(), Some(1.0));

    let (status, _) = delete(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = delete(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        format!("Vehicle log ID not found: {}", entry["id"])
    );

    let (status, body) = get(&app, "/vehicle-logs/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Vehicle log ID not found: abc");
}

#[tokio::test]
async fn test_injected_store_failure_is_internal() {
    let registry = InMemoryRegistry::new();
    let app = build_test_app(registry.clone());
    seed(&app).await;
    registry.fail_inserts(true);

    let (status, body) = post(&app, "/vehicle-logs", log_body("VIN-123", "D123456", "entry", 10.0)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["type"], "InternalError");
    assert!(body.get("details").is_none());
    assert_eq!(registry.log_count().await, 0);
}

#[tokio::test]
async fn test_huge_page_is_an_empty_page() {
    let app = build_test_app(InMemoryRegistry::new());
    seed(&app).await;
    post(&app, "/vehicle-logs", log_body("VIN-123", "D123456", "entry", 10.0)).await;

    for uri in [
        "/vehicle-logs?limit=10&page=9223372036854775807",
        "/vehicles?limit=10&page=9223372036854775807",
        "/drivers?limit=10&page=9223372036854775807",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }
}
