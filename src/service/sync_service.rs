// service/sync_service.rs
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::checkinmodel::CheckIn;
use crate::store::syncstore::SyncStore;
use crate::store::userstore::UserStore;

/// Connectivity changes and queue reconciliation. Whatever the queue
/// releases is written back to the user's check-in history so both copies
/// agree on what has been synced.
#[derive(Debug, Clone)]
pub struct SyncService {
    users: Arc<Mutex<UserStore>>,
    sync: Arc<Mutex<SyncStore>>,
}

impl SyncService {
    pub fn new(users: Arc<Mutex<UserStore>>, sync: Arc<Mutex<SyncStore>>) -> Self {
        Self { users, sync }
    }

    /// Flip connectivity; the offline-to-online edge drains a non-empty
    /// queue. Returns how many check-ins were synced.
    pub async fn set_online_status(&self, online: bool) -> Result<usize, ServiceError> {
        let drained = self.sync.lock().await.set_online_status(online).await?;
        self.reconcile(&drained).await?;

        if !drained.is_empty() {
            tracing::info!("Back online, auto-synced {} pending check-ins", drained.len());
        }
        Ok(drained.len())
    }

    pub async fn sync_now(&self) -> Result<usize, ServiceError> {
        let drained = self.sync.lock().await.sync_all().await?;
        self.reconcile(&drained).await?;

        tracing::info!("Synced {} pending check-ins", drained.len());
        Ok(drained.len())
    }

    /// Per-item acknowledgment. Returns false when the id was not pending.
    pub async fn acknowledge(&self, check_in_id: Uuid) -> Result<bool, ServiceError> {
        let removed = self.sync.lock().await.mark_as_synced(check_in_id).await?;
        match removed {
            Some(check_in) => {
                self.reconcile(std::slice::from_ref(&check_in)).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn is_online(&self) -> bool {
        self.sync.lock().await.is_online()
    }

    async fn reconcile(&self, drained: &[CheckIn]) -> Result<(), ServiceError> {
        if drained.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = drained.iter().map(|c| c.id).collect();
        let mut users = self.users.lock().await;
        if users.user().is_some() {
            users.mark_check_ins_synced(&ids).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::db::DBClient;
    use crate::models::checkinmodel::CheckInMethod;
    use crate::models::usermodel::UserRole;
    use chrono::Utc;

    struct Fixture {
        service: SyncService,
        users: Arc<Mutex<UserStore>>,
        sync: Arc<Mutex<SyncStore>>,
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
        let sync = Arc::new(Mutex::new(SyncStore::load(db).await.expect("sync")));

        users
            .lock()
            .await
            .create_user("1234567890".to_string(), UserRole::Customer, None)
            .await
            .expect("create user");

        let service = SyncService::new(users.clone(), sync.clone());
        Fixture {
            service,
            users,
            sync,
        }
    }

    async fn queue_check_in(fx: &Fixture) -> CheckIn {
        let user_id = fx.users.lock().await.user().expect("user").id;
        let check_in = CheckIn {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            user_id,
            timestamp: Utc::now(),
            points: 10,
            method: CheckInMethod::Wifi,
            synced: false,
        };

        fx.users
            .lock()
            .await
            .add_check_in(check_in.clone())
            .await
            .expect("user copy");
        fx.sync
            .lock()
            .await
            .add_pending_check_in(check_in.clone())
            .await
            .expect("queued");
        check_in
    }

    #[tokio::test]
    async fn coming_back_online_reconciles_user_copies() -> anyhow::Result<()> {
        let fx = fixture().await;
        fx.service.set_online_status(false).await?;
        let first = queue_check_in(&fx).await;
        let second = queue_check_in(&fx).await;

        let synced = fx.service.set_online_status(true).await?;
        assert_eq!(synced, 2);

        let users = fx.users.lock().await;
        let user = users.user().expect("user");
        for id in [first.id, second.id] {
            assert!(user.check_ins.iter().find(|c| c.id == id).expect("copy").synced);
        }
        Ok(())
    }

    #[tokio::test]
    async fn sync_now_works_on_an_empty_queue() -> anyhow::Result<()> {
        let fx = fixture().await;
        let before = Utc::now();

        assert_eq!(fx.service.sync_now().await?, 0);
        assert!(fx.sync.lock().await.last_sync_time().expect("stamped") >= before);
        Ok(())
    }

    #[tokio::test]
    async fn acknowledge_reconciles_a_single_item() -> anyhow::Result<()> {
        let fx = fixture().await;
        fx.service.set_online_status(false).await?;
        let first = queue_check_in(&fx).await;
        let second = queue_check_in(&fx).await;

        assert!(fx.service.acknowledge(first.id).await?);
        assert!(!fx.service.acknowledge(Uuid::new_v4()).await?);

        assert_eq!(fx.sync.lock().await.pending_check_ins().len(), 1);
        let users = fx.users.lock().await;
        let user = users.user().expect("user");
        assert!(user.check_ins.iter().find(|c| c.id == first.id).expect("copy").synced);
        assert!(!user.check_ins.iter().find(|c| c.id == second.id).expect("copy").synced);
        Ok(())
    }

    #[tokio::test]
    async fn reconciliation_survives_a_logged_out_user() -> anyhow::Result<()> {
        let fx = fixture().await;
        fx.service.set_online_status(false).await?;
        queue_check_in(&fx).await;
        fx.users.lock().await.logout().await?;

        // must not error even though there is no session to reconcile into
        assert_eq!(fx.service.set_online_status(true).await?, 1);
        Ok(())
    }
}
