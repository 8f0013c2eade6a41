use std::sync::Arc;

use tracing::info;

use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::models::{Driver, Pagination};
use crate::repositories::DriverDirectory;
use crate::utils::errors::{AppError, AppResult, ErrorInfo};

pub struct DriverController {
    repository: Arc<dyn DriverDirectory>,
}

impl DriverController {
    pub fn new(repository: Arc<dyn DriverDirectory>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<Driver> {
        let driver = Driver {
            license_id: request.license_id.trim().to_string(),
            first_name: request.first_name.trim().to_string(),
            surname: request.surname.trim().to_string(),
            second_name: trimmed(request.second_name),
            second_surname: trimmed(request.second_surname),
        };

        if self.repository.exists(&driver.license_id).await? {
            return Err(AppError::Duplicate(ErrorInfo::new(
                format!("Fail to create driver with license ID {}.", driver.license_id),
                "A driver with this license ID already exists.",
            )));
        }

        let created = self.repository.create(&driver).await?;
        info!("👤 Driver {} registered", created.license_id);
        Ok(created)
    }

    pub async fn read(&self, license_id: &str) -> AppResult<Option<Driver>> {
        self.repository.read(license_id).await
    }

    pub async fn read_all(&self, pagination: Pagination) -> AppResult<Vec<Driver>> {
        self.repository.read_all(pagination).await
    }

    pub async fn update(
        &self,
        license_id: &str,
        request: UpdateDriverRequest,
    ) -> AppResult<Option<Driver>> {
        let driver = Driver {
            license_id: license_id.to_string(),
            first_name: request.first_name.trim().to_string(),
            surname: request.surname.trim().to_string(),
            second_name: trimmed(request.second_name),
            second_surname: trimmed(request.second_surname),
        };

        self.repository.update(&driver).await
    }

    pub async fn delete(&self, license_id: &str) -> AppResult<bool> {
        let deleted = self.repository.delete(license_id).await?;
        if deleted {
            info!("🗑️ Driver {} deleted", license_id);
        }
        Ok(deleted)
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}
