use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No user session is active")]
    NoActiveUser,

    #[error("No business profile is active")]
    NoActiveBusiness,

    #[error("Business {0} not found")]
    BusinessNotFound(Uuid),

    #[error("Reward {0} not found")]
    RewardNotFound(Uuid),

    #[error("Reward {0} has already been claimed")]
    RewardAlreadyClaimed(Uuid),

    #[error("Not enough points: required {required}, available {available}")]
    InsufficientPoints { required: i32, available: i32 },

    #[error("Daily spin has already been used today")]
    SpinAlreadyUsed,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(
        "Unsupported state version {found} for namespace {namespace} (supported: {supported})"
    )]
    SchemaVersion {
        namespace: String,
        found: i64,
        supported: i64,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Validation(errors.to_string())
    }
}

impl From<validator::ValidationError> for ServiceError {
    fn from(error: validator::ValidationError) -> Self {
        ServiceError::Validation(error.to_string())
    }
}
