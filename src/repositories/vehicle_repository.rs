use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Pagination, Vehicle};
use crate::repositories::VehicleDirectory;
use crate::utils::errors::{internal_error, is_unique_violation, AppError, AppResult, ErrorInfo};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleDirectory for VehicleRepository {
    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let context = format!("Fail to create vehicle with number {}.", vehicle.number);

        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicle (number, brand, model)
            VALUES ($1, $2, $3)
            RETURNING number, brand, model
            "#,
        )
        .bind(&vehicle.number)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Duplicate(ErrorInfo::new(
                    context.as_str(),
                    "A vehicle with this number already exists.",
                ))
            } else {
                internal_error(context.as_str(), e)
            }
        })
    }

    async fn read(&self, number: &str) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT number, brand, model FROM vehicle WHERE number = $1")
            .bind(number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal_error(format!("Fail to read vehicle with number {}.", number), e))
    }

    async fn read_all(&self, pagination: Pagination) -> AppResult<Vec<Vehicle>> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT number, brand, model
            FROM vehicle
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            internal_error(
                format!(
                    "Failed to retrieve vehicles for page {} with limit {}.",
                    pagination.page(),
                    pagination.limit()
                ),
                e,
            )
        })
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicle
            SET brand = $1, model = $2
            WHERE number = $3
            RETURNING number, brand, model
            "#,
        )
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| internal_error(format!("Fail to update vehicle with number {}.", vehicle.number), e))
    }

    async fn delete(&self, number: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicle WHERE number = $1")
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|e| internal_error(format!("Fail to delete vehicle with number {}.", number), e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn exists(&self, number: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicle WHERE number = $1)")
                .bind(number)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| internal_error(format!("Fail to check vehicle with number {}.", number), e))?;

        Ok(result.0)
    }
}
