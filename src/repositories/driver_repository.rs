use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Driver, Pagination};
use crate::repositories::DriverDirectory;
use crate::utils::errors::{internal_error, is_unique_violation, AppError, AppResult, ErrorInfo};

const DRIVER_PROJECTION: &str = r#"
    SELECT driver.license_id,
           name.first_name,
           name.surname,
           name.second_name,
           name.second_surname
    FROM driver
             INNER JOIN driver_name name ON driver.id = name.driver_id
"#;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverDirectory for DriverRepository {
    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        let context = format!("Fail to create driver with license ID {}.", driver.license_id);
        let reject = |e: sqlx::Error| {
            if is_unique_violation(&e) {
                AppError::Duplicate(ErrorInfo::new(
                    context.as_str(),
                    "A driver with this license ID already exists.",
                ))
            } else {
                internal_error(context.as_str(), e)
            }
        };

        // driver + driver_name en una sola transacción
        let mut tx = self.pool.begin().await.map_err(reject)?;

        let driver_id: i64 =
            sqlx::query_scalar("INSERT INTO driver (license_id) VALUES ($1) RETURNING id")
                .bind(&driver.license_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(reject)?;

        sqlx::query(
            r#"
            INSERT INTO driver_name (driver_id, first_name, surname, second_name, second_surname)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(driver_id)
        .bind(&driver.first_name)
        .bind(&driver.surname)
        .bind(&driver.second_name)
        .bind(&driver.second_surname)
        .execute(&mut *tx)
        .await
        .map_err(reject)?;

        tx.commit().await.map_err(reject)?;

        Ok(driver.clone())
    }

    async fn read(&self, license_id: &str) -> AppResult<Option<Driver>> {
        let query = format!("{} WHERE driver.license_id = $1", DRIVER_PROJECTION);

        sqlx::query_as::<_, Driver>(&query)
            .bind(license_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal_error(format!("Fail to read driver with license ID {}.", license_id), e))
    }

    async fn read_all(&self, pagination: Pagination) -> AppResult<Vec<Driver>> {
        let query = format!("{} ORDER BY driver.id DESC LIMIT $1 OFFSET $2", DRIVER_PROJECTION);

        sqlx::query_as::<_, Driver>(&query)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                internal_error(
                    format!(
                        "Failed to retrieve drivers for page {} with limit {}.",
                        pagination.page(),
                        pagination.limit()
                    ),
                    e,
                )
            })
    }

    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>> {
        sqlx::query_as::<_, Driver>(
            r#"
            UPDATE driver_name AS name
            SET first_name     = $1,
                surname        = $2,
                second_name    = $3,
                second_surname = $4
            FROM driver
            WHERE driver.license_id = $5
              AND name.driver_id = driver.id
            RETURNING driver.license_id,
                      name.first_name,
                      name.surname,
                      name.second_name,
                      name.second_surname
            "#,
        )
        .bind(&driver.first_name)
        .bind(&driver.surname)
        .bind(&driver.second_name)
        .bind(&driver.second_surname)
        .bind(&driver.license_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            internal_error(
                format!("Fail to update driver with license ID {}.", driver.license_id),
                e,
            )
        })
    }

    async fn delete(&self, license_id: &str) -> AppResult<bool> {
        // driver_name se borra en cascada
        let result = sqlx::query("DELETE FROM driver WHERE license_id = $1")
            .bind(license_id)
            .execute(&self.pool)
            .await
            .map_err(|e| internal_error(format!("Fail to delete driver with license ID {}.", license_id), e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn exists(&self, license_id: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM driver WHERE license_id = $1)")
                .bind(license_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| internal_error(format!("Fail to check driver with license ID {}.", license_id), e))?;

        Ok(result.0)
    }
}
