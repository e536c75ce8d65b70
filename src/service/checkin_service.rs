// service/checkin_service.rs
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::dtos::checkindtos::{CheckInReceipt, CheckInRequestDto};
use crate::error::ServiceError;
use crate::models::checkinmodel::CheckIn;
use crate::store::businessstore::BusinessStore;
use crate::store::notificationstore::NotificationStore;
use crate::store::syncstore::SyncStore;
use crate::store::userstore::UserStore;
use crate::utils::streak::streak_bonus;

/// The customer-side check-in flow: streak update, point accrual, offline
/// queuing, and the notification the user sees. Stores are locked one at a
/// time; a crash mid-flow can leave the user and sync stores divergent,
/// exactly like the app it replaces.
#[derive(Debug, Clone)]
pub struct CheckInService {
    users: Arc<Mutex<UserStore>>,
    businesses: Arc<Mutex<BusinessStore>>,
    sync: Arc<Mutex<SyncStore>>,
    notifications: Arc<Mutex<NotificationStore>>,
}

impl CheckInService {
    pub fn new(
        users: Arc<Mutex<UserStore>>,
        businesses: Arc<Mutex<BusinessStore>>,
        sync: Arc<Mutex<SyncStore>>,
        notifications: Arc<Mutex<NotificationStore>>,
    ) -> Self {
        Self {
            users,
            businesses,
            sync,
            notifications,
        }
    }

    pub async fn check_in(&self, request: CheckInRequestDto) -> Result<CheckInReceipt, ServiceError> {
        let (business_name, points_per_visit) = {
            let businesses = self.businesses.lock().await;
            let business = businesses
                .business_by_id(request.business_id)
                .ok_or(ServiceError::BusinessNotFound(request.business_id))?;
            (business.name.clone(), business.loyalty_program.points_per_visit)
        };

        let is_online = self.sync.lock().await.is_online();

        let (check_in, streak_days, bonus, total) = {
            let mut users = self.users.lock().await;
            let user_id = users.user().ok_or(ServiceError::NoActiveUser)?.id;

            // bonus is computed against the streak the visit just produced
            let streak_days = users.update_streak().await?;
            let bonus = streak_bonus(streak_days);
            let total = points_per_visit + bonus;

            let check_in = CheckIn {
                id: Uuid::new_v4(),
                business_id: request.business_id,
                user_id,
                timestamp: Utc::now(),
                points: total,
                method: request.method,
                synced: is_online,
            };

            users.add_points(total).await?;
            users.add_check_in(check_in.clone()).await?;

            (check_in, streak_days, bonus, total)
        };

        let bonus_note = if bonus > 0 {
            format!(" (includes {} streak bonus)", bonus)
        } else {
            String::new()
        };

        if !is_online {
            self.sync
                .lock()
                .await
                .add_pending_check_in(check_in.clone())
                .await?;
            self.notifications
                .lock()
                .await
                .add_notification(
                    "Offline Check-in".to_string(),
                    format!(
                        "Your check-in at {} has been saved and will sync when you're back online.",
                        business_name
                    ),
                )
                .await?;
            tracing::info!("Queued offline check-in {} at {}", check_in.id, business_name);
        } else {
            let drained = self.sync.lock().await.sync_all().await?;
            if !drained.is_empty() {
                let ids: Vec<Uuid> = drained.iter().map(|c| c.id).collect();
                self.users.lock().await.mark_check_ins_synced(&ids).await?;
            }

            self.notifications
                .lock()
                .await
                .add_notification(
                    "Check-in Successful".to_string(),
                    format!(
                        "You earned {} points at {}{}!",
                        total, business_name, bonus_note
                    ),
                )
                .await?;
            tracing::info!(
                "Check-in {} at {}: {} points ({} streak days)",
                check_in.id,
                business_name,
                total,
                streak_days
            );
        }

        Ok(CheckInReceipt {
            check_in,
            total_points: total,
            streak_bonus: bonus,
            streak_days,
        })
    }
}
