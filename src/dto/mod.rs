//! DTOs de la API
//!
//! Cuerpos de request validados con `validator` y las queries de listado.

pub mod driver_dto;
pub mod vehicle_dto;
pub mod vehicle_log_dto;

use serde::Serialize;

/// Respuesta simple con mensaje, usada al eliminar recursos
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
