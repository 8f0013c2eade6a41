use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::vehicle_log::{InsertedLog, LastLog, NewVehicleLog, VehicleLogRow};
use crate::models::{Pagination, VehicleLog, VehicleLogFilter, VehicleLogUpdate};
use crate::repositories::{LogTransaction, VehicleLogStore};
use crate::utils::errors::{internal_error, AppResult};

/// Proyección desnormalizada común a `read` y `read_all`
const LOG_PROJECTION: &str = r#"
    SELECT log.id,
           vehicle.number      AS vehicle_number,
           vehicle.brand       AS vehicle_brand,
           vehicle.model       AS vehicle_model,
           driver.license_id   AS driver_license_id,
           name.first_name     AS driver_first_name,
           name.surname        AS driver_surname,
           name.second_name    AS driver_second_name,
           name.second_surname AS driver_second_surname,
           log.event_type      AS log_type,
           log.event_timestamp AS timestamp,
           log.mileage
    FROM vehicle_log log
             INNER JOIN vehicle ON log.vehicle_id = vehicle.id
             INNER JOIN driver ON log.driver_id = driver.id
             INNER JOIN driver_name name ON driver.id = name.driver_id
"#;

pub struct VehicleLogRepository {
    pool: PgPool,
}

impl VehicleLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleLogStore for VehicleLogRepository {
    async fn begin(&self) -> Result<Box<dyn LogTransaction>, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgLogTransaction { tx }))
    }

    async fn read(&self, id: i64) -> AppResult<Option<VehicleLog>> {
        let query = format!("{} WHERE log.id = $1", LOG_PROJECTION);

        let row = sqlx::query_as::<_, VehicleLogRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal_error(format!("Fail to read vehicle log with ID {}.", id), e))?;

        Ok(row.map(VehicleLog::from))
    }

    async fn read_all(
        &self,
        pagination: Pagination,
        filter: &VehicleLogFilter,
    ) -> AppResult<Vec<VehicleLog>> {
        let query = format!(
            r#"{}
            WHERE ($1::VARCHAR IS NULL OR vehicle.number = $1)
              AND ($2::VARCHAR IS NULL OR driver.license_id = $2)
              AND ($3::DATE IS NULL OR (log.event_timestamp AT TIME ZONE 'UTC')::DATE = $3)
            ORDER BY log.event_timestamp DESC, log.id DESC
            LIMIT $4 OFFSET $5
            "#,
            LOG_PROJECTION
        );

        let rows = sqlx::query_as::<_, VehicleLogRow>(&query)
            .bind(filter.vehicle_number.as_deref())
            .bind(filter.driver_license_id.as_deref())
            .bind(filter.date)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                internal_error(
                    format!(
                        "Failed to retrieve vehicle logs for page {} with limit {}.",
                        pagination.page(),
                        pagination.limit()
                    ),
                    e,
                )
            })?;

        Ok(rows.into_iter().map(VehicleLog::from).collect())
    }

    async fn update(&self, update: &VehicleLogUpdate) -> AppResult<Option<VehicleLog>> {
        let result = sqlx::query(
            r#"
            UPDATE vehicle_log
            SET event_type = $1,
                mileage    = $2
            WHERE id = $3
            "#,
        )
        .bind(update.log_type)
        .bind(update.mileage)
        .bind(update.id)
        .execute(&self.pool)
        .await
        .map_err(|e| internal_error(format!("Fail to update vehicle log with ID {}.", update.id), e))?;

        if result.rows_affected() == 1 {
            self.read(update.id).await
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicle_log WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| internal_error(format!("Fail to delete vehicle log with ID {}.", id), e))?;

        Ok(result.rows_affected() == 1)
    }
}

/// Transacción sobre una conexión del pool; `sqlx` hace rollback al soltarla.
struct PgLogTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LogTransaction for PgLogTransaction {
    async fn lock_vehicle(&mut self, number: &str) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM vehicle WHERE number = $1 FOR UPDATE")
            .bind(number)
            .fetch_optional(&mut *self.tx)
            .await
    }

    async fn find_driver(&mut self, license_id: &str) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM driver WHERE license_id = $1")
            .bind(license_id)
            .fetch_optional(&mut *self.tx)
            .await
    }

    async fn last_log(&mut self, vehicle_id: i64) -> Result<Option<LastLog>, sqlx::Error> {
        sqlx::query_as::<_, LastLog>(
            r#"
            SELECT event_type AS log_type, mileage
            FROM vehicle_log
            WHERE vehicle_id = $1
            ORDER BY event_timestamp DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&mut *self.tx)
        .await
    }

    async fn insert_log(&mut self, log: &NewVehicleLog) -> Result<InsertedLog, sqlx::Error> {
        // clock_timestamp(): hora real del insert, ya con el vehículo bloqueado
        sqlx::query_as::<_, InsertedLog>(
            r#"
            INSERT INTO vehicle_log (vehicle_id, driver_id, event_type, event_timestamp, mileage)
            VALUES ($1, $2, $3, clock_timestamp(), $4)
            RETURNING id, event_timestamp AS timestamp
            "#,
        )
        .bind(log.vehicle_id)
        .bind(log.driver_id)
        .bind(log.log_type)
        .bind(log.mileage)
        .fetch_one(&mut *self.tx)
        .await
    }

    async fn commit(self: Box<Self>) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    async fn rollback(self: Box<Self>) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}
