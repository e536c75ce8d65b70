// models/businessmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::checkinmodel::CheckIn;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub points_required: i32,
    pub claimed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyProgram {
    pub points_per_visit: i32,
    pub streak_bonus: i32,
    pub rewards: Vec<Reward>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub category: String,
    pub loyalty_program: LoyaltyProgram,
    pub customers: Vec<Uuid>,
    pub check_ins: Vec<CheckIn>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Day,
    Week,
    Month,
}

impl ReportPeriod {
    pub fn to_str(&self) -> &str {
        match self {
            ReportPeriod::Day => "day",
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
        }
    }
}

/// One row of the top-customer ranking.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRank {
    pub id: Uuid,
    pub check_ins: usize,
}
