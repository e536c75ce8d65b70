// store/userstore.rs
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::db::db::DBClient;
use crate::db::statedb::{StateStoreExt, AUTH_NAMESPACE};
use crate::error::ServiceError;
use crate::models::businessmodel::Reward;
use crate::models::checkinmodel::CheckIn;
use crate::models::usermodel::{User, UserRole};
use crate::utils::streak::calendar_days_between;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_onboarding: bool,
    pub temp_phone_number: Option<String>,
}

/// Owns the authenticated user's slice of state: identity, point balance,
/// check-in history, streak, referrals, and claimed rewards. Every mutation
/// persists the full state tree before returning.
#[derive(Debug)]
pub struct UserStore {
    state: AuthState,
    db: Arc<DBClient>,
    offset: FixedOffset,
    referral_bonus: i32,
}

impl UserStore {
    pub async fn load(db: Arc<DBClient>, config: &Config) -> Result<Self, ServiceError> {
        let state = db.load_state(AUTH_NAMESPACE).await?.unwrap_or_default();
        Ok(UserStore {
            state,
            db,
            offset: config.utc_offset(),
            referral_bonus: config.referral_bonus,
        })
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        self.db.save_state(AUTH_NAMESPACE, &self.state).await
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn is_onboarding(&self) -> bool {
        self.state.is_onboarding
    }

    pub fn temp_phone_number(&self) -> Option<&str> {
        self.state.temp_phone_number.as_deref()
    }

    fn user_mut(&mut self) -> Result<&mut User, ServiceError> {
        self.state.user.as_mut().ok_or(ServiceError::NoActiveUser)
    }

    pub async fn set_temp_phone_number(&mut self, phone_number: String) -> Result<(), ServiceError> {
        self.state.temp_phone_number = Some(phone_number);
        self.persist().await
    }

    /// Flip into onboarding once a phone number has been captured.
    pub async fn start_onboarding(&mut self) -> Result<(), ServiceError> {
        if self.state.temp_phone_number.is_some() {
            self.state.is_onboarding = true;
            self.persist().await?;
        }
        Ok(())
    }

    /// Create a fresh account with zeroed counters, replacing any existing
    /// session. Phone numbers are not checked for uniqueness.
    pub async fn create_user(
        &mut self,
        phone_number: String,
        role: UserRole,
        name: Option<String>,
    ) -> Result<User, ServiceError> {
        let user = User::new(phone_number, role, name);

        self.state = AuthState {
            user: Some(user.clone()),
            is_authenticated: true,
            is_onboarding: false,
            temp_phone_number: None,
        };
        self.persist().await?;

        Ok(user)
    }

    pub async fn logout(&mut self) -> Result<(), ServiceError> {
        self.state.user = None;
        self.state.is_authenticated = false;
        self.persist().await
    }

    /// Apply a point delta (negative for redemptions) and return the new
    /// balance. The balance is deliberately not floored here; the only
    /// negative-delta path in the crate is `redeem_reward`, which validates
    /// first.
    pub async fn add_points(&mut self, delta: i32) -> Result<i32, ServiceError> {
        let user = self.user_mut()?;
        user.points += delta;
        let balance = user.points;
        self.persist().await?;
        Ok(balance)
    }

    /// Append a check-in and stamp `last_check_in` with the wall clock, not
    /// the record's own timestamp, so queued check-ins still count as
    /// activity now.
    pub async fn add_check_in(&mut self, check_in: CheckIn) -> Result<(), ServiceError> {
        let user = self.user_mut()?;
        user.check_ins.push(check_in);
        user.last_check_in = Some(Utc::now());
        self.persist().await
    }

    /// Flip `synced` on the listed check-ins after queue reconciliation.
    pub async fn mark_check_ins_synced(&mut self, ids: &[Uuid]) -> Result<(), ServiceError> {
        if ids.is_empty() {
            return Ok(());
        }

        let user = self.user_mut()?;
        for check_in in user.check_ins.iter_mut() {
            if ids.contains(&check_in.id) {
                check_in.synced = true;
            }
        }
        self.persist().await
    }

    pub async fn update_streak(&mut self) -> Result<i32, ServiceError> {
        self.update_streak_at(Utc::now()).await
    }

    /// Streak policy: calendar days in the configured offset. A check-in on
    /// the same local day keeps the streak, one on the next local day
    /// extends it (even 23 hours later, across midnight), anything longer
    /// restarts at 1.
    pub async fn update_streak_at(&mut self, now: DateTime<Utc>) -> Result<i32, ServiceError> {
        let offset = self.offset;
        let user = self.user_mut()?;

        match user.last_check_in {
            None => user.streak_days = 1,
            Some(last) => match calendar_days_between(last, now, offset) {
                0 => {}
                1 => user.streak_days += 1,
                _ => user.streak_days = 1,
            },
        }

        let streak = user.streak_days;
        self.persist().await?;
        Ok(streak)
    }

    /// Record a referral and award the bonus, exactly once per referred id.
    /// Returns false when the id was already known.
    pub async fn add_referral(&mut self, referral_id: Uuid) -> Result<bool, ServiceError> {
        let bonus = self.referral_bonus;
        let user = self.user_mut()?;

        if user.referrals.contains(&referral_id) {
            return Ok(false);
        }

        user.referrals.push(referral_id);
        user.points += bonus;
        self.persist().await?;
        Ok(true)
    }

    /// Mark an already-held reward copy as claimed. Balance is untouched;
    /// the validated path is `redeem_reward`.
    pub async fn claim_reward(&mut self, reward_id: Uuid) -> Result<Reward, ServiceError> {
        let user = self.user_mut()?;
        let reward = user
            .rewards
            .iter_mut()
            .find(|r| r.id == reward_id)
            .ok_or(ServiceError::RewardNotFound(reward_id))?;

        reward.claimed = true;
        reward.claimed_at = Some(Utc::now());
        let claimed = reward.clone();

        self.persist().await?;
        Ok(claimed)
    }

    /// Atomic claim-and-deduct: validates the balance, stores the claimed
    /// copy, and deducts the cost in one persisted step, so callers cannot
    /// forget half of the protocol.
    pub async fn redeem_reward(&mut self, reward: &Reward) -> Result<Reward, ServiceError> {
        let user = self.user_mut()?;

        if user.rewards.iter().any(|r| r.id == reward.id) {
            return Err(ServiceError::RewardAlreadyClaimed(reward.id));
        }
        if user.points < reward.points_required {
            return Err(ServiceError::InsufficientPoints {
                required: reward.points_required,
                available: user.points,
            });
        }

        let claimed = Reward {
            claimed: true,
            claimed_at: Some(Utc::now()),
            ..reward.clone()
        };
        user.rewards.push(claimed.clone());
        user.points -= reward.points_required;

        self.persist().await?;
        Ok(claimed)
    }

    /// Test scaffolding: place the user mid-streak at a chosen point in the
    /// past, which no public operation can do (check-ins always stamp now).
    #[cfg(test)]
    pub(crate) fn backdate_streak(&mut self, streak_days: i32, last_check_in: DateTime<Utc>) {
        if let Some(user) = self.state.user.as_mut() {
            user.streak_days = streak_days;
            user.last_check_in = Some(last_check_in);
        }
    }
}
