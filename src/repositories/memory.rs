//! Registro en memoria
//!
//! Implementa los tres contratos de repositorio sobre un único estado
//! compartido. Las transacciones toman el lock del estado durante toda su
//! vida y trabajan sobre una copia que solo se publica en `commit`, así que
//! quedan serializadas y una transacción soltada no deja rastro.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::models::vehicle_log::{InsertedLog, LastLog, NewVehicleLog};
use crate::models::{
    Driver, Pagination, Vehicle, VehicleLog, VehicleLogFilter, VehicleLogType, VehicleLogUpdate,
};
use crate::repositories::{DriverDirectory, LogTransaction, VehicleDirectory, VehicleLogStore};
use crate::utils::errors::{internal_error, AppError, AppResult, ErrorInfo};

#[derive(Debug, Clone)]
struct StoredLog {
    vehicle_id: i64,
    driver_id: i64,
    log_type: VehicleLogType,
    mileage: Decimal,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
struct RegistryData {
    vehicle_seq: i64,
    driver_seq: i64,
    log_seq: i64,
    vehicles: BTreeMap<i64, Vehicle>,
    drivers: BTreeMap<i64, Driver>,
    logs: BTreeMap<i64, StoredLog>,
}

impl RegistryData {
    fn vehicle_id(&self, number: &str) -> Option<i64> {
        self.vehicles
            .iter()
            .find(|(_, vehicle)| vehicle.number == number)
            .map(|(id, _)| *id)
    }

    fn driver_id(&self, license_id: &str) -> Option<i64> {
        self.drivers
            .iter()
            .find(|(_, driver)| driver.license_id == license_id)
            .map(|(id, _)| *id)
    }

    fn hydrate(&self, id: i64, log: &StoredLog) -> Option<VehicleLog> {
        Some(VehicleLog {
            id,
            vehicle: self.vehicles.get(&log.vehicle_id)?.clone(),
            driver: self.drivers.get(&log.driver_id)?.clone(),
            log_type: log.log_type,
            timestamp: log.timestamp,
            mileage_in_kilometers: log.mileage,
        })
    }

    /// Todos los logs hidratados, más recientes primero
    fn logs_newest_first(&self) -> Vec<VehicleLog> {
        let mut logs: Vec<VehicleLog> = self
            .logs
            .iter()
            .filter_map(|(id, log)| self.hydrate(*id, log))
            .collect();

        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        logs
    }

    fn last_log(&self, vehicle_id: i64) -> Option<LastLog> {
        self.logs
            .iter()
            .filter(|(_, log)| log.vehicle_id == vehicle_id)
            .max_by(|(a_id, a), (b_id, b)| a.timestamp.cmp(&b.timestamp).then_with(|| a_id.cmp(b_id)))
            .map(|(_, log)| LastLog {
                log_type: log.log_type,
                mileage: log.mileage,
            })
    }
}

fn paginate<T>(items: impl IntoIterator<Item = T>, pagination: Pagination) -> Vec<T> {
    items
        .into_iter()
        .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(pagination.limit()).unwrap_or(0))
        .collect()
}

/// Vehículos, conductores y logs en memoria
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    data: Arc<Mutex<RegistryData>>,
    fail_inserts: Arc<AtomicBool>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hace fallar los próximos inserts de logs con un error de base de datos.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub async fn log_count(&self) -> usize {
        self.data.lock().await.logs.len()
    }
}

#[async_trait]
impl VehicleDirectory for InMemoryRegistry {
    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut data = self.data.lock().await;

        if data.vehicle_id(&vehicle.number).is_some() {
            return Err(AppError::Duplicate(ErrorInfo::new(
                format!("Fail to create vehicle with number {}.", vehicle.number),
                "A vehicle with this number already exists.",
            )));
        }

        data.vehicle_seq += 1;
        let id = data.vehicle_seq;
        data.vehicles.insert(id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn read(&self, number: &str) -> AppResult<Option<Vehicle>> {
        let data = self.data.lock().await;
        Ok(data
            .vehicle_id(number)
            .and_then(|id| data.vehicles.get(&id).cloned()))
    }

    async fn read_all(&self, pagination: Pagination) -> AppResult<Vec<Vehicle>> {
        let data = self.data.lock().await;
        Ok(paginate(data.vehicles.values().rev().cloned(), pagination))
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let mut data = self.data.lock().await;
        let Some(id) = data.vehicle_id(&vehicle.number) else {
            return Ok(None);
        };

        data.vehicles.insert(id, vehicle.clone());
        Ok(Some(vehicle.clone()))
    }

    async fn delete(&self, number: &str) -> AppResult<bool> {
        let mut data = self.data.lock().await;
        let Some(id) = data.vehicle_id(number) else {
            return Ok(false);
        };

        if data.logs.values().any(|log| log.vehicle_id == id) {
            return Err(internal_error(
                format!("Fail to delete vehicle with number {}.", number),
                "vehicle is still referenced by vehicle_log",
            ));
        }

        data.vehicles.remove(&id);
        Ok(true)
    }

    async fn exists(&self, number: &str) -> AppResult<bool> {
        Ok(self.data.lock().await.vehicle_id(number).is_some())
    }
}

#[async_trait]
impl DriverDirectory for InMemoryRegistry {
    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        let mut data = self.data.lock().await;

        if data.driver_id(&driver.license_id).is_some() {
            return Err(AppError::Duplicate(ErrorInfo::new(
                format!("Fail to create driver with license ID {}.", driver.license_id),
                "A driver with this license ID already exists.",
            )));
        }

        data.driver_seq += 1;
        let id = data.driver_seq;
        data.drivers.insert(id, driver.clone());
        Ok(driver.clone())
    }

    async fn read(&self, license_id: &str) -> AppResult<Option<Driver>> {
        let data = self.data.lock().await;
        Ok(data
            .driver_id(license_id)
            .and_then(|id| data.drivers.get(&id).cloned()))
    }

    async fn read_all(&self, pagination: Pagination) -> AppResult<Vec<Driver>> {
        let data = self.data.lock().await;
        Ok(paginate(data.drivers.values().rev().cloned(), pagination))
    }

    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>> {
        let mut data = self.data.lock().await;
        let Some(id) = data.driver_id(&driver.license_id) else {
            return Ok(None);
        };

        data.drivers.insert(id, driver.clone());
        Ok(Some(driver.clone()))
    }

    async fn delete(&self, license_id: &str) -> AppResult<bool> {
        let mut data = self.data.lock().await;
        let Some(id) = data.driver_id(license_id) else {
            return Ok(false);
        };

        if data.logs.values().any(|log| log.driver_id == id) {
            return Err(internal_error(
                format!("Fail to delete driver with license ID {}.", license_id),
                "driver is still referenced by vehicle_log",
            ));
        }

        data.drivers.remove(&id);
        Ok(true)
    }

    async fn exists(&self, license_id: &str) -> AppResult<bool> {
        Ok(self.data.lock().await.driver_id(license_id).is_some())
    }
}

#[async_trait]
impl VehicleLogStore for InMemoryRegistry {
    async fn begin(&self) -> Result<Box<dyn LogTransaction>, sqlx::Error> {
        let guard = self.data.clone().lock_owned().await;
        let staged = guard.clone();

        Ok(Box::new(MemoryTransaction {
            guard,
            staged,
            fail_inserts: self.fail_inserts.load(Ordering::SeqCst),
        }))
    }

    async fn read(&self, id: i64) -> AppResult<Option<VehicleLog>> {
        let data = self.data.lock().await;
        Ok(data.logs.get(&id).and_then(|log| data.hydrate(id, log)))
    }

    async fn read_all(
        &self,
        pagination: Pagination,
        filter: &VehicleLogFilter,
    ) -> AppResult<Vec<VehicleLog>> {
        let data = self.data.lock().await;
        let matching = data
            .logs_newest_first()
            .into_iter()
            .filter(|log| filter.matches(log));

        Ok(paginate(matching, pagination))
    }

    async fn update(&self, update: &VehicleLogUpdate) -> AppResult<Option<VehicleLog>> {
        let mut data = self.data.lock().await;
        let Some(log) = data.logs.get_mut(&update.id) else {
            return Ok(None);
        };

        log.log_type = update.log_type;
        log.mileage = update.mileage;

        let log = log.clone();
        Ok(data.hydrate(update.id, &log))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.data.lock().await.logs.remove(&id).is_some())
    }
}

struct MemoryTransaction {
    guard: OwnedMutexGuard<RegistryData>,
    staged: RegistryData,
    fail_inserts: bool,
}

#[async_trait]
impl LogTransaction for MemoryTransaction {
    async fn lock_vehicle(&mut self, number: &str) -> Result<Option<i64>, sqlx::Error> {
        Ok(self.staged.vehicle_id(number))
    }

    async fn find_driver(&mut self, license_id: &str) -> Result<Option<i64>, sqlx::Error> {
        Ok(self.staged.driver_id(license_id))
    }

    async fn last_log(&mut self, vehicle_id: i64) -> Result<Option<LastLog>, sqlx::Error> {
        Ok(self.staged.last_log(vehicle_id))
    }

    async fn insert_log(&mut self, log: &NewVehicleLog) -> Result<InsertedLog, sqlx::Error> {
        if self.fail_inserts {
            return Err(sqlx::Error::Protocol(
                "simulated failure inserting into vehicle_log".to_string(),
            ));
        }

        self.staged.log_seq += 1;
        let id = self.staged.log_seq;
        let timestamp = Utc::now();

        self.staged.logs.insert(
            id,
            StoredLog {
                vehicle_id: log.vehicle_id,
                driver_id: log.driver_id,
                log_type: log.log_type,
                mileage: log.mileage,
                timestamp,
            },
        );

        Ok(InsertedLog { id, timestamp })
    }

    async fn commit(self: Box<Self>) -> Result<(), sqlx::Error> {
        let MemoryTransaction {
            mut guard, staged, ..
        } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
