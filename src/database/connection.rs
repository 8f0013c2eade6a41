//! Conexión a PostgreSQL
//!
//! Este módulo crea el pool, aplica migraciones y verifica la conexión.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Pool de conexiones listo para usar
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🔌 Conectando a {}", config.describe());

        let pool = config.create_pool().await?;
        let connection = Self { pool };
        connection.health_check().await?;

        info!(
            "✅ Base de datos conectada (max {} conexiones, TLS {})",
            config.max_connections,
            if config.require_tls { "requerido" } else { "opcional" }
        );
        Ok(connection)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("failed to run database migrations")?;

        info!("📦 Migraciones aplicadas");
        Ok(())
    }

    /// Verificar que la conexión funciona
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("database health check failed")?;
        Ok(())
    }
}
