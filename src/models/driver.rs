//! Modelo de Driver
//!
//! Un conductor se identifica por su licencia; los nombres viven en la
//! tabla `driver_name`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persona que conduce un vehículo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub license_id: String,
    pub first_name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_surname: Option<String>,
}
