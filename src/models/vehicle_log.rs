//! Modelo de VehicleLog
//!
//! Un log registra la entrada o salida de un vehículo, el conductor y la
//! lectura del odómetro. Este módulo contiene también las filas planas que
//! devuelve la base de datos y los tipos que usa la transacción de creación.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use super::{Driver, Vehicle};

/// Tipo de evento - mapea al ENUM vehicle_log_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_log_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleLogType {
    Entry,
    Exit,
}

impl fmt::Display for VehicleLogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleLogType::Entry => write!(f, "entry"),
            VehicleLogType::Exit => write!(f, "exit"),
        }
    }
}

/// Log hidratado con el vehículo y el conductor completos
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLog {
    pub id: i64,
    pub vehicle: Vehicle,
    pub driver: Driver,
    pub log_type: VehicleLogType,
    pub timestamp: DateTime<Utc>,
    pub mileage_in_kilometers: Decimal,
}

/// Fila desnormalizada del join log + vehicle + driver + driver_name
#[derive(Debug, FromRow)]
pub struct VehicleLogRow {
    pub id: i64,
    pub vehicle_number: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub driver_license_id: String,
    pub driver_first_name: String,
    pub driver_surname: String,
    pub driver_second_name: Option<String>,
    pub driver_second_surname: Option<String>,
    pub log_type: VehicleLogType,
    pub timestamp: DateTime<Utc>,
    pub mileage: Decimal,
}

impl From<VehicleLogRow> for VehicleLog {
    fn from(row: VehicleLogRow) -> Self {
        Self {
            id: row.id,
            vehicle: Vehicle {
                number: row.vehicle_number,
                brand: row.vehicle_brand,
                model: row.vehicle_model,
            },
            driver: Driver {
                license_id: row.driver_license_id,
                first_name: row.driver_first_name,
                surname: row.driver_surname,
                second_name: row.driver_second_name,
                second_surname: row.driver_second_surname,
            },
            log_type: row.log_type,
            timestamp: row.timestamp,
            mileage_in_kilometers: row.mileage,
        }
    }
}

/// Último log registrado de un vehículo, lo que necesitan las reglas
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct LastLog {
    pub log_type: VehicleLogType,
    pub mileage: Decimal,
}

/// Fila a insertar, con las claves internas ya resueltas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicleLog {
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub log_type: VehicleLogType,
    pub mileage: Decimal,
}

/// Lo que el servidor asigna al insertar
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct InsertedLog {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
}

/// Filtros de `readAll`; un campo en `None` no filtra nada
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleLogFilter {
    pub vehicle_number: Option<String>,
    pub driver_license_id: Option<String>,
    /// Fecha de calendario (UTC), sin hora
    pub date: Option<NaiveDate>,
}

impl VehicleLogFilter {
    pub fn matches(&self, log: &VehicleLog) -> bool {
        self.vehicle_number
            .as_ref()
            .map_or(true, |number| &log.vehicle.number == number)
            && self
                .driver_license_id
                .as_ref()
                .map_or(true, |license_id| &log.driver.license_id == license_id)
            && self
                .date
                .map_or(true, |date| log.timestamp.date_naive() == date)
    }
}

/// Campos actualizables de un log existente
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleLogUpdate {
    pub id: i64,
    pub log_type: VehicleLogType,
    pub mileage: Decimal,
}
