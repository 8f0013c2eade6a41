use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::pagination::PageQuery;
use crate::models::{Pagination, VehicleLogFilter, VehicleLogType};
use crate::utils::errors::{AppError, AppResult, FieldIssue};
use crate::utils::validation::{
    validate_date, validate_non_negative, validate_not_blank, LICENSE_ID_REGEX,
};

// Request para registrar una entrada o salida
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateVehicleLogRequest {
    #[validate(length(min = 1, max = 20), custom = "validate_not_blank")]
    pub vehicle_number: String,

    #[validate(
        length(min = 6, max = 20),
        regex(
            path = "LICENSE_ID_REGEX",
            message = "Invalid license ID format. Only letters, numbers, and hyphens are allowed."
        )
    )]
    pub driver_license_id: String,

    pub log_type: VehicleLogType,

    #[validate(custom = "validate_non_negative")]
    pub mileage_in_kilometers: Decimal,
}

// Request para corregir un log existente
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateVehicleLogRequest {
    pub log_type: VehicleLogType,

    #[validate(custom = "validate_non_negative")]
    pub mileage_in_kilometers: Decimal,
}

/// Query de `GET /vehicle-logs`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLogQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub vehicle_number: Option<String>,
    pub driver_license_id: Option<String>,
    pub date: Option<String>,
}

impl VehicleLogQuery {
    pub fn pagination(&self) -> Pagination {
        PageQuery {
            limit: self.limit.clone(),
            page: self.page.clone(),
        }
        .pagination()
    }

    /// Los strings vacíos cuentan como filtro ausente.
    pub fn filter(&self) -> AppResult<VehicleLogFilter> {
        let date = match non_empty(&self.date) {
            Some(raw) => Some(validate_date(&raw).map_err(|e| {
                AppError::Validation(vec![FieldIssue {
                    path: "date".to_string(),
                    message: e
                        .message
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid date".to_string()),
                }])
            })?),
            None => None,
        };

        Ok(VehicleLogFilter {
            vehicle_number: non_empty(&self.vehicle_number),
            driver_license_id: non_empty(&self.driver_license_id),
            date,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_valid_create_request() {
        let request: CreateVehicleLogRequest = serde_json::from_value(json!({
            "vehicleNumber": "VIN-123",
            "driverLicenseId": "D123456",
            "logType": "entry",
            "mileageInKilometers": 20
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.log_type, VehicleLogType::Entry);
        assert_eq!(request.mileage_in_kilometers, Decimal::new(20, 0));
    }

    #[test]
    fn test_negative_mileage_is_rejected() {
        let request: CreateVehicleLogRequest = serde_json::from_value(json!({
            "vehicleNumber": "VIN-123",
            "driverLicenseId": "D123456",
            "logType": "exit",
            "mileageInKilometers": -5
        }))
        .unwrap();

        let err = AppError::from(request.validate().unwrap_err());
        assert!(matches!(err, AppError::Validation(ref issues) if issues.len() == 1));
    }

    #[test]
    fn test_invalid_log_type_is_rejected() {
        let result = serde_json::from_value::<UpdateVehicleLogRequest>(json!({
            "logType": "parked",
            "mileageInKilometers": 10
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let result = serde_json::from_value::<UpdateVehicleLogRequest>(json!({
            "logType": "entry"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_query_filter() {
        let query = VehicleLogQuery {
            vehicle_number: Some("V1".to_string()),
            driver_license_id: Some("".to_string()),
            date: Some("2024-11-27".to_string()),
            ..Default::default()
        };

        let filter = query.filter().unwrap();
        assert_eq!(filter.vehicle_number.as_deref(), Some("V1"));
        assert_eq!(filter.driver_license_id, None);
        assert_eq!(filter.date, NaiveDate::from_ymd_opt(2024, 11, 27));
    }

    #[test]
    fn test_query_invalid_date() {
        let query = VehicleLogQuery {
            date: Some("27/11/2024".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.filter(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_query_pagination() {
        let query = VehicleLogQuery {
            limit: Some("10".to_string()),
            page: Some("2".to_string()),
            ..Default::default()
        };
        assert_eq!(query.pagination().offset(), 10);
    }
}
