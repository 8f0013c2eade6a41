//! Middleware de la API
//!
//! CORS y validación de cuerpos de request.

pub mod cors;
pub mod validation;
