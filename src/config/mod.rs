//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del servidor y de la base de datos,
//! leída de variables de entorno.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::EnvironmentConfig;

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Variable opcional; vacía cuenta como ausente.
pub(crate) fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn env_or(name: &str, default: &str) -> String {
    env_var(name).unwrap_or_else(|| default.to_string())
}

/// Variable numérica con valor por defecto; un valor inválido es un error.
pub(crate) fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_var(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", name, raw)),
        None => Ok(default),
    }
}

pub(crate) fn env_required(name: &str) -> Result<String> {
    env_var(name).with_context(|| format!("{} must be set", name))
}

pub(crate) fn env_flag(name: &str) -> bool {
    matches!(
        env_var(name).as_deref().map(str::to_ascii_lowercase).as_deref(),
        Some("true" | "1" | "yes")
    )
}
