//! Modelo de Vehicle
//!
//! Mapea a la tabla `vehicle`; `number` es la clave natural e inmutable.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Vehículo registrado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    /// Número único del vehículo
    pub number: String,
    /// Por ejemplo, Toyota, Ford
    pub brand: String,
    /// Por ejemplo, Camry, Mustang
    pub model: String,
}
