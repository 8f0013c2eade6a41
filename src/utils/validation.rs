//! Utilidades de validación
//!
//! Este módulo contiene las expresiones regulares y validadores custom
//! que usan los DTOs con `#[derive(Validate)]`.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Licencias: letras, números y guiones
    pub static ref LICENSE_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9-]+$").unwrap();
}

/// Validar que un string no esté vacío tras recortar espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("Value cannot be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que el kilometraje no sea negativo
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &0);
        error.add_param("actual".into(), &value.to_string());
        error.message = Some("Number must be greater than or equal to 0".into());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error.message = Some("Invalid date, expected format YYYY-MM-DD".into());
        error
    })
}
