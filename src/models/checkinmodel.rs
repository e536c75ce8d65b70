// models/checkinmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckInMethod {
    Wifi,
    Qr,
    Nfc,
}

impl CheckInMethod {
    pub fn to_str(&self) -> &str {
        match self {
            CheckInMethod::Wifi => "wifi",
            CheckInMethod::Qr => "qr",
            CheckInMethod::Nfc => "nfc",
        }
    }
}

/// A single visit event. Copies of the same record live on both the user
/// and the business side; `id` is the only link between them.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: Uuid,
    pub business_id: Uuid,
    pub user_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub points: i32,
    pub method: CheckInMethod,
    pub synced: bool,
}
