// store/notificationstore.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::db::DBClient;
use crate::db::statedb::{StateStoreExt, NOTIFICATION_NAMESPACE};
use crate::error::ServiceError;
use crate::models::notificationmodel::Notification;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationState {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

/// Most-recent-first log of user-facing messages. The unread counter is
/// recomputed from the list on every read-state change so it cannot drift.
#[derive(Debug)]
pub struct NotificationStore {
    state: NotificationState,
    db: Arc<DBClient>,
}

impl NotificationStore {
    pub async fn load(db: Arc<DBClient>) -> Result<Self, ServiceError> {
        let state = db
            .load_state(NOTIFICATION_NAMESPACE)
            .await?
            .unwrap_or_default();
        Ok(NotificationStore { state, db })
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        self.db.save_state(NOTIFICATION_NAMESPACE, &self.state).await
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.state.unread_count
    }

    fn recompute_unread(&mut self) {
        self.state.unread_count = self
            .state
            .notifications
            .iter()
            .filter(|n| !n.read)
            .count();
    }

    pub async fn add_notification(
        &mut self,
        title: String,
        message: String,
    ) -> Result<Notification, ServiceError> {
        let notification = Notification::new(title, message);
        self.state.notifications.insert(0, notification.clone());
        self.state.unread_count += 1;
        self.persist().await?;
        Ok(notification)
    }

    /// Unknown ids are ignored; the counter is recomputed either way.
    pub async fn mark_as_read(&mut self, id: Uuid) -> Result<(), ServiceError> {
        if let Some(notification) = self.state.notifications.iter_mut().find(|n| n.id == id) {
            notification.read = true;
        }
        self.recompute_unread();
        self.persist().await
    }

    pub async fn mark_all_as_read(&mut self) -> Result<(), ServiceError> {
        for notification in self.state.notifications.iter_mut() {
            notification.read = true;
        }
        self.state.unread_count = 0;
        self.persist().await
    }

    pub async fn clear_notifications(&mut self) -> Result<(), ServiceError> {
        self.state.notifications.clear();
        self.state.unread_count = 0;
        self.persist().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> NotificationStore {
        let db = Arc::new(
            DBClient::connect("sqlite::memory:")
                .await
                .expect("in-memory database"),
        );
        NotificationStore::load(db).await.expect("fresh store")
    }

    #[tokio::test]
    async fn newest_notification_comes_first() -> anyhow::Result<()> {
        let mut store = test_store().await;
        store
            .add_notification("First".to_string(), "one".to_string())
            .await?;
        store
            .add_notification("Second".to_string(), "two".to_string())
            .await?;

        assert_eq!(store.notifications()[0].title, "Second");
        assert_eq!(store.notifications()[1].title, "First");
        assert_eq!(store.unread_count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn mark_as_read_recomputes_the_counter() -> anyhow::Result<()> {
        let mut store = test_store().await;
        let first = store
            .add_notification("First".to_string(), "one".to_string())
            .await?;
        store
            .add_notification("Second".to_string(), "two".to_string())
            .await?;

        store.mark_as_read(first.id).await?;
        assert_eq!(store.unread_count(), 1);

        // marking the same one again changes nothing
        store.mark_as_read(first.id).await?;
        assert_eq!(store.unread_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_are_ignored() -> anyhow::Result<()> {
        let mut store = test_store().await;
        store
            .add_notification("Only".to_string(), "entry".to_string())
            .await?;

        store.mark_as_read(Uuid::new_v4()).await?;
        assert_eq!(store.unread_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn mark_all_clears_the_counter() -> anyhow::Result<()> {
        let mut store = test_store().await;
        let mut ids = Vec::new();
        for i in 0..5 {
            let n = store
                .add_notification(format!("Title {i}"), "message".to_string())
                .await?;
            ids.push(n.id);
        }
        store.mark_as_read(ids[0]).await?;
        store.mark_as_read(ids[1]).await?;
        assert_eq!(store.unread_count(), 3);

        store.mark_all_as_read().await?;
        assert_eq!(store.unread_count(), 0);
        assert!(store.notifications().iter().all(|n| n.read));
        Ok(())
    }

    #[tokio::test]
    async fn clear_empties_the_log() -> anyhow::Result<()> {
        let mut store = test_store().await;
        store
            .add_notification("Gone".to_string(), "soon".to_string())
            .await?;

        store.clear_notifications().await?;
        assert!(store.notifications().is_empty());
        assert_eq!(store.unread_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn state_survives_a_reload_from_the_same_database() -> anyhow::Result<()> {
        let db = Arc::new(DBClient::connect("sqlite::memory:").await?);

        let mut store = NotificationStore::load(db.clone()).await?;
        store
            .add_notification("Persisted".to_string(), "still here".to_string())
            .await?;

        let reloaded = NotificationStore::load(db).await?;
        assert_eq!(reloaded.notifications().len(), 1);
        assert_eq!(reloaded.unread_count(), 1);
        Ok(())
    }
}
