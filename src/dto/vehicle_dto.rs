use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 20), custom = "validate_not_blank")]
    pub number: String,

    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub brand: String,

    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub model: String,
}

// Request para actualizar marca y modelo; el número va en la ruta
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub brand: String,

    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub model: String,
}
