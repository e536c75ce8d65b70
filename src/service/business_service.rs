// service/business_service.rs
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::dtos::businessdtos::{CreateBusinessDto, CreateRewardDto, UpdateLoyaltyProgramDto};
use crate::error::ServiceError;
use crate::models::businessmodel::{Business, CustomerRank, ReportPeriod, Reward};
use crate::models::checkinmodel::CheckIn;
use crate::store::businessstore::BusinessStore;

/// Profile management and the analytics views a business owner sees.
#[derive(Debug, Clone)]
pub struct BusinessService {
    businesses: Arc<Mutex<BusinessStore>>,
}

impl BusinessService {
    pub fn new(businesses: Arc<Mutex<BusinessStore>>) -> Self {
        Self { businesses }
    }

    pub async fn create_business(&self, dto: CreateBusinessDto) -> Result<Business, ServiceError> {
        dto.validate()?;
        dto.validate_phone()?;

        let mut businesses = self.businesses.lock().await;
        let business = businesses
            .create_business(dto.name, dto.phone_number, dto.category)
            .await?;

        tracing::info!("Created business profile {} ({})", business.id, business.name);
        Ok(business)
    }

    pub async fn update_loyalty_program(
        &self,
        dto: UpdateLoyaltyProgramDto,
    ) -> Result<(), ServiceError> {
        dto.validate()?;
        self.businesses
            .lock()
            .await
            .update_loyalty_program(dto.into_program())
            .await
    }

    pub async fn add_reward(&self, dto: CreateRewardDto) -> Result<Reward, ServiceError> {
        dto.validate()?;

        let reward = dto.into_reward();
        self.businesses.lock().await.add_reward(reward.clone()).await?;
        Ok(reward)
    }

    /// Record a check-in arriving at the current business: the visitor joins
    /// the customer list and the event joins the history.
    pub async fn record_check_in(&self, check_in: CheckIn) -> Result<(), ServiceError> {
        let mut businesses = self.businesses.lock().await;
        businesses.add_customer(check_in.user_id).await?;
        businesses.add_check_in(check_in).await
    }

    pub async fn check_ins_for_period(&self, period: ReportPeriod) -> Vec<CheckIn> {
        self.businesses.lock().await.check_ins_for_period(period)
    }

    pub async fn top_customers(&self) -> Vec<CustomerRank> {
        self.businesses.lock().await.top_customers()
    }

    pub async fn current_business(&self) -> Option<Business> {
        self.businesses.lock().await.current_business().cloned()
    }

    pub async fn business_by_id(&self, id: Uuid) -> Option<Business> {
        self.businesses.lock().await.business_by_id(id).cloned()
    }
}
