use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(title: String, message: String) -> Self {
        Notification {
            id: Uuid::new_v4(),
            title,
            message,
            read: false,
            timestamp: Utc::now(),
        }
    }
}
