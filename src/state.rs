//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::repositories::{
    DriverDirectory, DriverRepository, InMemoryRegistry, VehicleDirectory, VehicleLogRepository,
    VehicleLogStore, VehicleRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub vehicles: Arc<dyn VehicleDirectory>,
    pub drivers: Arc<dyn DriverDirectory>,
    pub vehicle_logs: Arc<dyn VehicleLogStore>,
}

impl AppState {
    /// Repositorios PostgreSQL sobre un mismo pool
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            config: Arc::new(config),
            vehicles: Arc::new(VehicleRepository::new(pool.clone())),
            drivers: Arc::new(DriverRepository::new(pool.clone())),
            vehicle_logs: Arc::new(VehicleLogRepository::new(pool)),
        }
    }

    /// Los tres contratos servidos por el mismo registro en memoria
    pub fn in_memory(config: EnvironmentConfig, registry: InMemoryRegistry) -> Self {
        Self {
            config: Arc::new(config),
            vehicles: Arc::new(registry.clone()),
            drivers: Arc::new(registry.clone()),
            vehicle_logs: Arc::new(registry),
        }
    }
}
