//! Controlador de logs de vehículos
//!
//! La creación de un log es el único camino de escritura con reglas de
//! dominio. Dentro de una transacción, en este orden y cortando en el primer
//! fallo:
//!
//! 1. el vehículo existe (y queda bloqueado hasta el commit),
//! 2. el conductor existe,
//! 3. el kilometraje no baja respecto al último log, salvo reset a cero,
//! 4. el tipo de evento alterna respecto al último log,
//! 5. se inserta la fila.
//!
//! Tras el commit se leen vehículo y conductor para devolver el log completo.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::dto::vehicle_log_dto::{CreateVehicleLogRequest, UpdateVehicleLogRequest};
use crate::models::vehicle_log::{InsertedLog, LastLog, NewVehicleLog};
use crate::models::{Pagination, VehicleLog, VehicleLogFilter, VehicleLogType, VehicleLogUpdate};
use crate::repositories::{DriverDirectory, LogTransaction, VehicleDirectory, VehicleLogStore};
use crate::utils::errors::{internal_error, AppError, AppResult, ErrorInfo};

/// Motivo por el que una creación se aborta antes del commit
#[derive(Debug)]
pub enum LogRejection {
    VehicleNotFound,
    DriverNotFound,
    IncorrectMileage { last_mileage: Decimal },
    IncorrectEvent { last_log_type: VehicleLogType },
    Store(sqlx::Error),
}

impl From<sqlx::Error> for LogRejection {
    fn from(error: sqlx::Error) -> Self {
        LogRejection::Store(error)
    }
}

impl LogRejection {
    /// Las violaciones de reglas salen tipadas; los fallos del almacén,
    /// como error interno con la causa solo en los logs.
    pub fn into_app_error(self, context: &str, request: &CreateVehicleLogRequest) -> AppError {
        match self {
            LogRejection::VehicleNotFound => AppError::ReferenceNotFound(ErrorInfo::new(
                context,
                "A vehicle with this number was not found.",
            )),
            LogRejection::DriverNotFound => AppError::ReferenceNotFound(ErrorInfo::new(
                context,
                "A driver with this license ID was not found.",
            )),
            LogRejection::IncorrectMileage { last_mileage } => AppError::IncorrectValue(ErrorInfo::new(
                context,
                format!(
                    "Provided vehicle mileage {} is invalid. Last recorded mileage: {}. \
                     Vehicle mileage can only be greater than or equals to the last mileage \
                     recorded (i.e., increasing) or zero (i.e., reset).",
                    request.mileage_in_kilometers, last_mileage
                ),
            )),
            LogRejection::IncorrectEvent { last_log_type } => AppError::IncorrectValue(ErrorInfo::new(
                context,
                format!(
                    "Provided log type \"{}\" is invalid. Last recorded log: \"{}\". \
                     Log type cannot be the same of the last vehicle log.",
                    request.log_type, last_log_type
                ),
            )),
            LogRejection::Store(error) => internal_error(context, error),
        }
    }
}

/// Kilometraje válido si no hay log previo, si es un reset a cero o si no
/// baja respecto al último registrado.
pub fn check_mileage(last: Option<&LastLog>, mileage: Decimal) -> Result<(), LogRejection> {
    match last {
        Some(last) if !mileage.is_zero() && mileage < last.mileage => {
            Err(LogRejection::IncorrectMileage {
                last_mileage: last.mileage,
            })
        }
        _ => Ok(()),
    }
}

/// Entrada y salida deben alternar por vehículo.
pub fn check_event(last: Option<&LastLog>, log_type: VehicleLogType) -> Result<(), LogRejection> {
    match last {
        Some(last) if last.log_type == log_type => Err(LogRejection::IncorrectEvent {
            last_log_type: last.log_type,
        }),
        _ => Ok(()),
    }
}

/// Pasos 1-5 sobre una transacción abierta; no hace commit ni rollback.
pub async fn validate_and_insert(
    tx: &mut dyn LogTransaction,
    request: &CreateVehicleLogRequest,
) -> Result<InsertedLog, LogRejection> {
    let vehicle_id = tx
        .lock_vehicle(&request.vehicle_number)
        .await?
        .ok_or(LogRejection::VehicleNotFound)?;

    let driver_id = tx
        .find_driver(&request.driver_license_id)
        .await?
        .ok_or(LogRejection::DriverNotFound)?;

    let last = tx.last_log(vehicle_id).await?;
    check_mileage(last.as_ref(), request.mileage_in_kilometers)?;
    check_event(last.as_ref(), request.log_type)?;

    let inserted = tx
        .insert_log(&NewVehicleLog {
            vehicle_id,
            driver_id,
            log_type: request.log_type,
            mileage: request.mileage_in_kilometers,
        })
        .await?;

    Ok(inserted)
}

pub struct VehicleLogController {
    store: Arc<dyn VehicleLogStore>,
    vehicles: Arc<dyn VehicleDirectory>,
    drivers: Arc<dyn DriverDirectory>,
}

impl VehicleLogController {
    pub fn new(
        store: Arc<dyn VehicleLogStore>,
        vehicles: Arc<dyn VehicleDirectory>,
        drivers: Arc<dyn DriverDirectory>,
    ) -> Self {
        Self {
            store,
            vehicles,
            drivers,
        }
    }

    pub async fn create(&self, request: CreateVehicleLogRequest) -> AppResult<VehicleLog> {
        let request = CreateVehicleLogRequest {
            vehicle_number: request.vehicle_number.trim().to_string(),
            driver_license_id: request.driver_license_id.trim().to_string(),
            ..request
        };
        let context = format!(
            "Fail to create vehicle log ({} of vehicle {} by driver {}).",
            request.log_type, request.vehicle_number, request.driver_license_id
        );

        let mut tx = self
            .store
            .begin()
            .await
            .map_err(|e| internal_error(context.as_str(), e))?;

        let inserted = match validate_and_insert(tx.as_mut(), &request).await {
            Ok(inserted) => inserted,
            Err(rejection) => {
                if let Err(e) = tx.rollback().await {
                    warn!("⚠️ Rollback failed for vehicle {}: {}", request.vehicle_number, e);
                }
                return Err(rejection.into_app_error(&context, &request));
            }
        };

        tx.commit()
            .await
            .map_err(|e| internal_error(context.as_str(), e))?;

        info!(
            "✅ Vehicle log {} registered: {} of vehicle {}",
            inserted.id, request.log_type, request.vehicle_number
        );

        // El log ya está confirmado; un fallo aquí no deshace nada.
        let vehicle = self
            .vehicles
            .read(&request.vehicle_number)
            .await?
            .ok_or_else(|| {
                internal_error(
                    "Fail to read vehicle after registering this vehicle log.",
                    format!("vehicle {} not found after commit", request.vehicle_number),
                )
            })?;

        let driver = self
            .drivers
            .read(&request.driver_license_id)
            .await?
            .ok_or_else(|| {
                internal_error(
                    "Fail to read driver after registering this vehicle log.",
                    format!("driver {} not found after commit", request.driver_license_id),
                )
            })?;

        Ok(VehicleLog {
            id: inserted.id,
            vehicle,
            driver,
            log_type: request.log_type,
            timestamp: inserted.timestamp,
            mileage_in_kilometers: request.mileage_in_kilometers,
        })
    }

    pub async fn read(&self, id: i64) -> AppResult<Option<VehicleLog>> {
        self.store.read(id).await
    }

    pub async fn read_all(
        &self,
        pagination: Pagination,
        filter: &VehicleLogFilter,
    ) -> AppResult<Vec<VehicleLog>> {
        self.store.read_all(pagination, filter).await
    }

    /// Corrección directa: no vuelve a aplicar las reglas de kilometraje ni
    /// de alternancia.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateVehicleLogRequest,
    ) -> AppResult<Option<VehicleLog>> {
        self.store
            .update(&VehicleLogUpdate {
                id,
                log_type: request.log_type,
                mileage: request.mileage_in_kilometers,
            })
            .await
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last(log_type: VehicleLogType, mileage: i64) -> LastLog {
        LastLog {
            log_type,
            mileage: Decimal::new(mileage, 0),
        }
    }

    #[test]
    fn test_any_mileage_without_previous_log() {
        assert!(check_mileage(None, Decimal::ZERO).is_ok());
        assert!(check_mileage(None, Decimal::new(123_456, 1)).is_ok());
    }

    #[test]
    fn test_mileage_must_not_decrease() {
        let previous = last(VehicleLogType::Entry, 1100);
        assert!(check_mileage(Some(&previous), Decimal::new(1100, 0)).is_ok());
        assert!(check_mileage(Some(&previous), Decimal::new(1101, 0)).is_ok());

        let rejection = check_mileage(Some(&previous), Decimal::new(50, 0)).unwrap_err();
        assert!(matches!(
            rejection,
            LogRejection::IncorrectMileage { last_mileage } if last_mileage == Decimal::new(1100, 0)
        ));
    }

    #[test]
    fn test_mileage_reset_to_zero_is_always_valid() {
        let previous = last(VehicleLogType::Exit, 250_000);
        assert!(check_mileage(Some(&previous), Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_events_must_alternate() {
        assert!(check_event(None, VehicleLogType::Entry).is_ok());
        assert!(check_event(None, VehicleLogType::Exit).is_ok());

        let previous = last(VehicleLogType::Entry, 10);
        assert!(check_event(Some(&previous), VehicleLogType::Exit).is_ok());
        assert!(matches!(
            check_event(Some(&previous), VehicleLogType::Entry),
            Err(LogRejection::IncorrectEvent {
                last_log_type: VehicleLogType::Entry
            })
        ));
    }

    #[test]
    fn test_rejections_map_to_typed_errors() {
        let request = CreateVehicleLogRequest {
            vehicle_number: "VIN-123".to_string(),
            driver_license_id: "D123456".to_string(),
            log_type: VehicleLogType::Exit,
            mileage_in_kilometers: Decimal::new(50, 0),
        };

        let err = LogRejection::IncorrectMileage {
            last_mileage: Decimal::new(1100, 0),
        }
        .into_app_error("ctx", &request);
        let AppError::IncorrectValue(info) = err else {
            panic!("expected an incorrect value error");
        };
        assert!(info.detail.contains("Provided vehicle mileage 50 is invalid"));
        assert!(info.detail.contains("Last recorded mileage: 1100"));

        let err = LogRejection::VehicleNotFound.into_app_error("ctx", &request);
        assert_eq!(
            err,
            AppError::ReferenceNotFound(ErrorInfo::new(
                "ctx",
                "A vehicle with this number was not found."
            ))
        );

        let err = LogRejection::Store(sqlx::Error::PoolTimedOut).into_app_error("ctx", &request);
        assert_eq!(err, AppError::Internal("ctx".to_string()));
    }
}
