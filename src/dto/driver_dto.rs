use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, LICENSE_ID_REGEX};

// Request para registrar un conductor
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDriverRequest {
    #[validate(
        length(min = 6, max = 20),
        regex(
            path = "LICENSE_ID_REGEX",
            message = "Invalid license ID format. Only letters, numbers, and hyphens are allowed."
        )
    )]
    pub license_id: String,

    #[validate(length(min = 1, max = 30), custom = "validate_not_blank")]
    pub first_name: String,

    #[validate(length(min = 1, max = 30), custom = "validate_not_blank")]
    pub surname: String,

    #[validate(length(min = 1, max = 30), custom = "validate_not_blank")]
    pub second_name: Option<String>,

    #[validate(length(min = 1, max = 30), custom = "validate_not_blank")]
    pub second_surname: Option<String>,
}

// Request para actualizar los nombres; la licencia va en la ruta
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 30), custom = "validate_not_blank")]
    pub first_name: String,

    #[validate(length(min = 1, max = 30), custom = "validate_not_blank")]
    pub surname: String,

    #[validate(length(min = 1, max = 30), custom = "validate_not_blank")]
    pub second_name: Option<String>,

    #[validate(length(min = 1, max = 30), custom = "validate_not_blank")]
    pub second_surname: Option<String>,
}
