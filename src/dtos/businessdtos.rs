// dtos/businessdtos.rs
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::businessmodel::{LoyaltyProgram, Reward};
use crate::utils::phone::validate_phone_number;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessDto {
    #[validate(length(min = 1, message = "Business name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
}

impl CreateBusinessDto {
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

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoyaltyProgramDto {
    #[validate(range(min = 0, message = "Points per visit cannot be negative"))]
    pub points_per_visit: i32,

    #[validate(range(min = 0, message = "Streak bonus cannot be negative"))]
    pub streak_bonus: i32,

    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl UpdateLoyaltyProgramDto {
    pub fn into_program(self) -> LoyaltyProgram {
        LoyaltyProgram {
            points_per_visit: self.points_per_visit,
            streak_bonus: self.streak_bonus,
            rewards: self.rewards,
        }
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRewardDto {
    #[validate(length(min = 1, message = "Reward name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(range(min = 1, message = "Points required must be positive"))]
    pub points_required: i32,
}

impl CreateRewardDto {
    pub fn into_reward(self) -> Reward {
        Reward {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            points_required: self.points_required,
            claimed: false,
            claimed_at: None,
        }
    }
}
