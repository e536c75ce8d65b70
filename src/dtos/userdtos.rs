// dtos/userdtos.rs
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::usermodel::UserRole;
use crate::utils::phone::validate_phone_number;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,

    pub role: UserRole,

    pub name: Option<String>,
}

impl RegisterUserDto {
    pub fn validate_phone(&self) -> Result<(), ValidationError> {
        if !validate_phone_number(&self.phone_number) {
            let mut error = ValidationError::new("invalid_phone");
            error.message = Some(Cow::from(
                "Phone number must be in a valid format (e.g., (123) 456-7890)",
            ));
            return Err(error);
        }
        Ok(())
    }
}
