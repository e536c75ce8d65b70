// service/reward_service.rs
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use rand::Rng;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::ServiceError;
use crate::models::businessmodel::Reward;
use crate::store::businessstore::BusinessStore;
use crate::store::notificationstore::NotificationStore;
use crate::store::userstore::UserStore;
use crate::utils::rewards::points_to_next_reward;
use crate::utils::streak::calendar_days_between;

/// Segments on the daily spin wheel, weighted as laid out on screen.
pub const WHEEL_SEGMENTS: [i32; 6] = [5, 10, 15, 20, 25, 5];

/// Redemption and bonus-point flows over the user store.
#[derive(Debug)]
pub struct RewardService {
    users: Arc<Mutex<UserStore>>,
    businesses: Arc<Mutex<BusinessStore>>,
    notifications: Arc<Mutex<NotificationStore>>,
    last_spin: Mutex<Option<DateTime<Utc>>>,
    offset: FixedOffset,
}

impl RewardService {
    pub fn new(
        users: Arc<Mutex<UserStore>>,
        businesses: Arc<Mutex<BusinessStore>>,
        notifications: Arc<Mutex<NotificationStore>>,
        config: &Config,
    ) -> Self {
        Self {
            users,
            businesses,
            notifications,
            last_spin: Mutex::new(None),
            offset: config.utc_offset(),
        }
    }

    /// Validate the balance, store the claimed copy, and deduct the cost as
    /// one operation, then tell the user.
    pub async fn redeem_reward(&self, reward: &Reward) -> Result<Reward, ServiceError> {
        let claimed = self.users.lock().await.redeem_reward(reward).await?;

        self.notifications
            .lock()
            .await
            .add_notification(
                "Reward Claimed".to_string(),
                format!(
                    "You've successfully claimed \"{}\". Visit the business to redeem it!",
                    reward.name
                ),
            )
            .await?;

        tracing::info!(
            "Reward {} redeemed for {} points",
            reward.id,
            reward.points_required
        );
        Ok(claimed)
    }

    pub async fn daily_spin(&self) -> Result<i32, ServiceError> {
        self.daily_spin_at(Utc::now()).await
    }

    /// Award a random wheel segment, at most once per local calendar day.
    pub async fn daily_spin_at(&self, now: DateTime<Utc>) -> Result<i32, ServiceError> {
        let mut last_spin = self.last_spin.lock().await;
        if let Some(last) = *last_spin {
            if calendar_days_between(last, now, self.offset) == 0 {
                return Err(ServiceError::SpinAlreadyUsed);
            }
        }

        let value = {
            let mut rng = rand::rng();
            WHEEL_SEGMENTS[rng.random_range(0..WHEEL_SEGMENTS.len())]
        };

        self.users.lock().await.add_points(value).await?;
        *last_spin = Some(now);

        self.notifications
            .lock()
            .await
            .add_notification(
                "Daily Spin Bonus".to_string(),
                format!(
                    "Congratulations! You won {} bonus points from the daily spin.",
                    value
                ),
            )
            .await?;

        Ok(value)
    }

    /// How far the user is from the cheapest reward they cannot yet afford,
    /// against the current business's catalog.
    pub async fn points_to_next_reward(&self) -> Result<i32, ServiceError> {
        let points = self
            .users
            .lock()
            .await
            .user()
            .ok_or(ServiceError::NoActiveUser)?
            .points;

        let rewards = self
            .businesses
            .lock()
            .await
            .current_business()
            .map(|b| b.loyalty_program.rewards.clone())
            .unwrap_or_default();

        Ok(points_to_next_reward(points, &rewards))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::db::DBClient;
    use crate::models::usermodel::UserRole;
    use uuid::Uuid;

    struct Fixture {
        service: RewardService,
        users: Arc<Mutex<UserStore>>,
        businesses: Arc<Mutex<BusinessStore>>,
        notifications: Arc<Mutex<NotificationStore>>,
    }

    async fn fixture() -> Fixture {
        let db = Arc::new(
            DBClient::connect("sqlite::memory:")
                .await
                .expect("in-memory database"),
        );
        let config = Config::default();

        let users = Arc::new(Mutex::new(
            UserStore::load(db.clone(), &config).await.expect("users"),
        ));
        let businesses = Arc::new(Mutex::new(
            BusinessStore::load(db.clone(), &config)
                .await
                .expect("businesses"),
        ));
        let notifications = Arc::new(Mutex::new(
            NotificationStore::load(db).await.expect("notifications"),
        ));

        users
            .lock()
            .await
            .create_user("1234567890".to_string(), UserRole::Customer, None)
            .await
            .expect("create user");

        let service = RewardService::new(
            users.clone(),
            businesses.clone(),
            notifications.clone(),
            &config,
        );

        Fixture {
            service,
            users,
            businesses,
            notifications,
        }
    }

    fn reward(points_required: i32) -> Reward {
        Reward {
            id: Uuid::new_v4(),
            name: "Free Haircut".to_string(),
            description: "Redeem for a free haircut".to_string(),
            points_required,
            claimed: false,
            claimed_at: None,
        }
    }

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().expect("test timestamp")
    }

    #[tokio::test]
    async fn redeeming_deducts_and_notifies() -> anyhow::Result<()> {
        let fx = fixture().await;
        fx.users.lock().await.add_points(120).await?;

        let claimed = fx.service.redeem_reward(&reward(100)).await?;
        assert!(claimed.claimed);
        assert_eq!(fx.users.lock().await.user().map(|u| u.points), Some(20));

        let notifications = fx.notifications.lock().await;
        assert_eq!(notifications.notifications()[0].title, "Reward Claimed");
        Ok(())
    }

    #[tokio::test]
    async fn an_unaffordable_reward_is_refused_without_a_notification() -> anyhow::Result<()> {
        let fx = fixture().await;
        fx.users.lock().await.add_points(10).await?;

        let result = fx.service.redeem_reward(&reward(100)).await;
        assert!(matches!(
            result,
            Err(ServiceError::InsufficientPoints { required: 100, available: 10 })
        ));
        assert!(fx.notifications.lock().await.notifications().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn the_spin_pays_a_wheel_segment_once_per_day() -> anyhow::Result<()> {
        let fx = fixture().await;
        let today = utc("2026-03-02T10:00:00Z");

        let value = fx.service.daily_spin_at(today).await?;
        assert!(WHEEL_SEGMENTS.contains(&value));
        assert_eq!(fx.users.lock().await.user().map(|u| u.points), Some(value));
        assert_eq!(
            fx.notifications.lock().await.notifications()[0].title,
            "Daily Spin Bonus"
        );

        // same local day: refused
        let again = fx.service.daily_spin_at(utc("2026-03-02T22:00:00Z")).await;
        assert!(matches!(again, Err(ServiceError::SpinAlreadyUsed)));

        // next local day: allowed again
        assert!(fx
            .service
            .daily_spin_at(utc("2026-03-03T08:00:00Z"))
            .await
            .is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn distance_to_the_next_reward_uses_the_current_catalog() -> anyhow::Result<()> {
        let fx = fixture().await;
        fx.users.lock().await.add_points(40).await?;

        // no business yet: nothing to aim for
        assert_eq!(fx.service.points_to_next_reward().await?, 0);

        {
            let mut businesses = fx.businesses.lock().await;
            businesses
                .create_business(
                    "Cafe Delight".to_string(),
                    "1234567890".to_string(),
                    "Cafe".to_string(),
                )
                .await?;
            businesses.add_reward(reward(30)).await?;
            businesses.add_reward(reward(100)).await?;
        }

        assert_eq!(fx.service.points_to_next_reward().await?, 60);
        Ok(())
    }
}
