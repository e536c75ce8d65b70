// models/usermodel.rs
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::businessmodel::Reward;
use crate::models::checkinmodel::CheckIn;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Business,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Business => "business",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub role: UserRole,
    pub phone_number: String,
    pub name: String,
    pub points: i32,
    pub check_ins: Vec<CheckIn>,
    pub rewards: Vec<Reward>,
    pub referrals: Vec<Uuid>,
    pub streak_days: i32,
    pub last_check_in: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(phone_number: String, role: UserRole, name: Option<String>) -> Self {
        User {
            id: Uuid::new_v4(),
            role,
            phone_number,
            name: name.unwrap_or_default(),
            points: 0,
            check_ins: Vec::new(),
            rewards: Vec::new(),
            referrals: Vec::new(),
            streak_days: 0,
            last_check_in: None,
        }
    }
}
