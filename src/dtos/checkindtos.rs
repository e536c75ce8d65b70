// dtos/checkindtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::checkinmodel::{CheckIn, CheckInMethod};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequestDto {
    pub business_id: Uuid,
    pub method: CheckInMethod,
}

/// What a completed check-in earned, for the caller to display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInReceipt {
    pub check_in: CheckIn,
    pub total_points: i32,
    pub streak_bonus: i32,
    pub streak_days: i32,
}
