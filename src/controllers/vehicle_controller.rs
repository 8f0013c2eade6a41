use std::sync::Arc;

use tracing::info;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::{Pagination, Vehicle};
use crate::repositories::VehicleDirectory;
use crate::utils::errors::{AppError, AppResult, ErrorInfo};

pub struct VehicleController {
    repository: Arc<dyn VehicleDirectory>,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleDirectory>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let vehicle = Vehicle {
            number: request.number.trim().to_string(),
            brand: request.brand.trim().to_string(),
            model: request.model.trim().to_string(),
        };

        // La restricción UNIQUE sigue cubriendo la carrera entre dos altas
        if self.repository.exists(&vehicle.number).await? {
            return Err(AppError::Duplicate(ErrorInfo::new(
                format!("Fail to create vehicle with number {}.", vehicle.number),
                "A vehicle with this number already exists.",
            )));
        }

        let created = self.repository.create(&vehicle).await?;
        info!("🚗 Vehicle {} registered", created.number);
        Ok(created)
    }

    pub async fn read(&self, number: &str) -> AppResult<Option<Vehicle>> {
        self.repository.read(number).await
    }

    pub async fn read_all(&self, pagination: Pagination) -> AppResult<Vec<Vehicle>> {
        self.repository.read_all(pagination).await
    }

    pub async fn update(
        &self,
        number: &str,
        request: UpdateVehicleRequest,
    ) -> AppResult<Option<Vehicle>> {
        let vehicle = Vehicle {
            number: number.to_string(),
            brand: request.brand.trim().to_string(),
            model: request.model.trim().to_string(),
        };

        self.repository.update(&vehicle).await
    }

    pub async fn delete(&self, number: &str) -> AppResult<bool> {
        let deleted = self.repository.delete(number).await?;
        if deleted {
            info!("🗑️ Vehicle {} deleted", number);
        }
        Ok(deleted)
    }
}
