// store/businessstore.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::db::db::DBClient;
use crate::db::statedb::{StateStoreExt, BUSINESS_NAMESPACE};
use crate::error::ServiceError;
use crate::models::businessmodel::{Business, CustomerRank, LoyaltyProgram, ReportPeriod, Reward};
use crate::models::checkinmodel::CheckIn;
use crate::utils::streak::local_midnight;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessState {
    pub businesses: Vec<Business>,
    /// The profile that mutations act on. Held by id so there is exactly one
    /// copy of the profile to keep current.
    pub current_business_id: Option<Uuid>,
}

/// Owns every known business profile plus the active one, and derives the
/// analytics views (period filters, top customers) from its check-in log.
#[derive(Debug)]
pub struct BusinessStore {
    state: BusinessState,
    db: Arc<DBClient>,
    offset: FixedOffset,
    default_points_per_visit: i32,
    default_streak_bonus: i32,
}

impl BusinessStore {
    pub async fn load(db: Arc<DBClient>, config: &Config) -> Result<Self, ServiceError> {
        let state = db.load_state(BUSINESS_NAMESPACE).await?.unwrap_or_default();
        Ok(BusinessStore {
            state,
            db,
            offset: config.utc_offset(),
            default_points_per_visit: config.default_points_per_visit,
            default_streak_bonus: config.default_streak_bonus,
        })
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        self.db.save_state(BUSINESS_NAMESPACE, &self.state).await
    }

    pub fn current_business(&self) -> Option<&Business> {
        let id = self.state.current_business_id?;
        self.state.businesses.iter().find(|b| b.id == id)
    }

    pub fn business_by_id(&self, id: Uuid) -> Option<&Business> {
        self.state.businesses.iter().find(|b| b.id == id)
    }

    fn current_mut(&mut self) -> Result<&mut Business, ServiceError> {
        let id = self
            .state
            .current_business_id
            .ok_or(ServiceError::NoActiveBusiness)?;
        self.state
            .businesses
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ServiceError::NoActiveBusiness)
    }

    /// Create a profile with the stock loyalty program and make it current.
    pub async fn create_business(
        &mut self,
        name: String,
        phone_number: String,
        category: String,
    ) -> Result<Business, ServiceError> {
        let business = Business {
            id: Uuid::new_v4(),
            name,
            phone_number,
            category,
            loyalty_program: LoyaltyProgram {
                points_per_visit: self.default_points_per_visit,
                streak_bonus: self.default_streak_bonus,
                rewards: Vec::new(),
            },
            customers: Vec::new(),
            check_ins: Vec::new(),
        };

        self.state.businesses.push(business.clone());
        self.state.current_business_id = Some(business.id);
        self.persist().await?;

        Ok(business)
    }

    /// Full replacement of the loyalty-program sub-object, catalog included.
    pub async fn update_loyalty_program(
        &mut self,
        program: LoyaltyProgram,
    ) -> Result<(), ServiceError> {
        let business = self.current_mut()?;
        business.loyalty_program = program;
        self.persist().await
    }

    /// Idempotent set-insert. Returns false when the customer was already
    /// on the list.
    pub async fn add_customer(&mut self, customer_id: Uuid) -> Result<bool, ServiceError> {
        let business = self.current_mut()?;
        if business.customers.contains(&customer_id) {
            return Ok(false);
        }

        business.customers.push(customer_id);
        self.persist().await?;
        Ok(true)
    }

    pub async fn add_check_in(&mut self, check_in: CheckIn) -> Result<(), ServiceError> {
        let business = self.current_mut()?;
        business.check_ins.push(check_in);
        self.persist().await
    }

    pub async fn add_reward(&mut self, reward: Reward) -> Result<(), ServiceError> {
        let business = self.current_mut()?;
        business.loyalty_program.rewards.push(reward);
        self.persist().await
    }

    pub fn check_ins_for_period(&self, period: ReportPeriod) -> Vec<CheckIn> {
        self.check_ins_for_period_at(period, Utc::now())
    }

    /// Check-ins for the current business whose timestamp falls inside the
    /// window ending at `now`: since local midnight for `day`, the last
    /// 7x24h for `week`, one calendar month for `month`. Storage order is
    /// preserved.
    pub fn check_ins_for_period_at(
        &self,
        period: ReportPeriod,
        now: DateTime<Utc>,
    ) -> Vec<CheckIn> {
        let Some(business) = self.current_business() else {
            return Vec::new();
        };

        let start = match period {
            ReportPeriod::Day => local_midnight(now, self.offset),
            ReportPeriod::Week => now - Duration::days(7),
            ReportPeriod::Month => now.checked_sub_months(Months::new(1)).unwrap_or(now),
        };

        business
            .check_ins
            .iter()
            .filter(|c| c.timestamp >= start && c.timestamp <= now)
            .cloned()
            .collect()
    }

    /// Tally check-ins per customer, most visits first, top 10. Ties keep
    /// the order in which a customer first appears in the log.
    pub fn top_customers(&self) -> Vec<CustomerRank> {
        let Some(business) = self.current_business() else {
            return Vec::new();
        };

        let mut tally: Vec<CustomerRank> = Vec::new();
        for check_in in &business.check_ins {
            match tally.iter_mut().find(|entry| entry.id == check_in.user_id) {
                Some(entry) => entry.check_ins += 1,
                None => tally.push(CustomerRank {
                    id: check_in.user_id,
                    check_ins: 1,
                }),
            }
        }

        tally.sort_by(|a, b| b.check_ins.cmp(&a.check_ins));
        tally.truncate(10);
        tally
    }
}
