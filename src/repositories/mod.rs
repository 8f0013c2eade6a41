//! Repositorios
//!
//! Contratos de acceso a datos y sus implementaciones: PostgreSQL para
//! producción y un registro en memoria para tests.
//!
//! `VehicleDirectory` y `DriverDirectory` son los directorios de entidades
//! con clave natural. `VehicleLogStore` es el almacén de logs; la creación de
//! un log pasa siempre por una `LogTransaction`, que es la única forma de
//! insertar filas en él.

use async_trait::async_trait;

use crate::models::vehicle_log::{InsertedLog, LastLog, NewVehicleLog};
use crate::models::{
    Driver, Pagination, Vehicle, VehicleLog, VehicleLogFilter, VehicleLogUpdate,
};
use crate::utils::errors::AppResult;

pub mod driver_repository;
pub mod memory;
pub mod vehicle_log_repository;
pub mod vehicle_repository;

pub use driver_repository::DriverRepository;
pub use memory::InMemoryRegistry;
pub use vehicle_log_repository::VehicleLogRepository;
pub use vehicle_repository::VehicleRepository;

/// Directorio de vehículos por número
#[async_trait]
pub trait VehicleDirectory: Send + Sync {
    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;
    async fn read(&self, number: &str) -> AppResult<Option<Vehicle>>;
    async fn read_all(&self, pagination: Pagination) -> AppResult<Vec<Vehicle>>;
    /// Solo `brand` y `model` cambian; `None` si el número no existe.
    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>>;
    async fn delete(&self, number: &str) -> AppResult<bool>;
    async fn exists(&self, number: &str) -> AppResult<bool>;
}

/// Directorio de conductores por licencia
#[async_trait]
pub trait DriverDirectory: Send + Sync {
    async fn create(&self, driver: &Driver) -> AppResult<Driver>;
    async fn read(&self, license_id: &str) -> AppResult<Option<Driver>>;
    async fn read_all(&self, pagination: Pagination) -> AppResult<Vec<Driver>>;
    /// Solo cambian los nombres; `None` si la licencia no existe.
    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>>;
    async fn delete(&self, license_id: &str) -> AppResult<bool>;
    async fn exists(&self, license_id: &str) -> AppResult<bool>;
}

/// Almacén de logs de vehículos
#[async_trait]
pub trait VehicleLogStore: Send + Sync {
    /// Abre una transacción con una conexión propia durante toda su vida.
    async fn begin(&self) -> Result<Box<dyn LogTransaction>, sqlx::Error>;
    async fn read(&self, id: i64) -> AppResult<Option<VehicleLog>>;
    /// Más recientes primero.
    async fn read_all(
        &self,
        pagination: Pagination,
        filter: &VehicleLogFilter,
    ) -> AppResult<Vec<VehicleLog>>;
    async fn update(&self, update: &VehicleLogUpdate) -> AppResult<Option<VehicleLog>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Transacción de creación de un log.
///
/// Si se suelta sin `commit` se deshace y la conexión vuelve al pool, así que
/// cualquier salida temprana queda cubierta.
#[async_trait]
pub trait LogTransaction: Send {
    /// Busca el vehículo y bloquea su fila hasta el fin de la transacción;
    /// dos creaciones concurrentes para el mismo vehículo se serializan aquí.
    async fn lock_vehicle(&mut self, number: &str) -> Result<Option<i64>, sqlx::Error>;
    async fn find_driver(&mut self, license_id: &str) -> Result<Option<i64>, sqlx::Error>;
    /// Log más reciente del vehículo (por timestamp y luego id, descendente).
    async fn last_log(&mut self, vehicle_id: i64) -> Result<Option<LastLog>, sqlx::Error>;
    async fn insert_log(&mut self, log: &NewVehicleLog) -> Result<InsertedLog, sqlx::Error>;
    async fn commit(self: Box<Self>) -> Result<(), sqlx::Error>;
    async fn rollback(self: Box<Self>) -> Result<(), sqlx::Error>;
}
