// service/account_service.rs
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::userdtos::RegisterUserDto;
use crate::error::ServiceError;
use crate::models::usermodel::User;
use crate::store::userstore::UserStore;
use crate::utils::phone::validate_phone_number;

/// Registration, session, and referral operations over the user store.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<Mutex<UserStore>>,
}

impl AccountService {
    pub fn new(users: Arc<Mutex<UserStore>>) -> Self {
        Self { users }
    }

    /// Capture the phone number entered on the first onboarding screen and
    /// flip the store into onboarding.
    pub async fn begin_onboarding(&self, phone_number: &str) -> Result<(), ServiceError> {
        if !validate_phone_number(phone_number) {
            return Err(ServiceError::Validation(
                "Phone number must be in a valid format (e.g., (123) 456-7890)".to_string(),
            ));
        }

        let mut users = self.users.lock().await;
        users.set_temp_phone_number(phone_number.to_string()).await?;
        users.start_onboarding().await
    }

    pub async fn register(&self, dto: RegisterUserDto) -> Result<User, ServiceError> {
        dto.validate()?;
        dto.validate_phone()?;

        let mut users = self.users.lock().await;
        let user = users.create_user(dto.phone_number, dto.role, dto.name).await?;

        tracing::info!("Created {} account {}", user.role.to_str(), user.id);
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), ServiceError> {
        self.users.lock().await.logout().await
    }

    pub async fn add_referral(&self, referral_id: Uuid) -> Result<bool, ServiceError> {
        let added = self.users.lock().await.add_referral(referral_id).await?;
        if added {
            tracing::info!("Referral {} recorded, bonus awarded", referral_id);
        }
        Ok(added)
    }

    pub async fn current_user(&self) -> Option<User> {
        self.users.lock().await.user().cloned()
    }
}
