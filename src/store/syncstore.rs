// store/syncstore.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::db::DBClient;
use crate::db::statedb::{StateStoreExt, SYNC_NAMESPACE};
use crate::error::ServiceError;
use crate::models::checkinmodel::CheckIn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncState {
    pub pending_check_ins: Vec<CheckIn>,
    pub is_online: bool,
    pub last_sync_time: Option<DateTime<Utc>>,
}

impl Default for SyncState {
    fn default() -> Self {
        SyncState {
            pending_check_ins: Vec::new(),
            // a fresh install assumes connectivity until told otherwise
            is_online: true,
            last_sync_time: None,
        }
    }
}

/// Holds check-ins accepted while offline until they are reconciled. Each
/// item moves created -> pending -> synced; the simulated backend cannot
/// fail, so there is no failed state.
#[derive(Debug)]
pub struct SyncStore {
    state: SyncState,
    db: Arc<DBClient>,
}

impl SyncStore {
    pub async fn load(db: Arc<DBClient>) -> Result<Self, ServiceError> {
        let state = db.load_state(SYNC_NAMESPACE).await?.unwrap_or_default();
        Ok(SyncStore { state, db })
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        self.db.save_state(SYNC_NAMESPACE, &self.state).await
    }

    pub fn pending_check_ins(&self) -> &[CheckIn] {
        &self.state.pending_check_ins
    }

    pub fn is_online(&self) -> bool {
        self.state.is_online
    }

    pub fn last_sync_time(&self) -> Option<DateTime<Utc>> {
        self.state.last_sync_time
    }

    pub async fn add_pending_check_in(&mut self, mut check_in: CheckIn) -> Result<(), ServiceError> {
        check_in.synced = false;
        self.state.pending_check_ins.push(check_in);
        self.persist().await
    }

    /// Per-item acknowledgment: remove one pending check-in and stamp the
    /// sync time. Returns the acknowledged record, flagged as synced.
    pub async fn mark_as_synced(
        &mut self,
        check_in_id: Uuid,
    ) -> Result<Option<CheckIn>, ServiceError> {
        let removed = self
            .state
            .pending_check_ins
            .iter()
            .position(|c| c.id == check_in_id)
            .map(|index| {
                let mut check_in = self.state.pending_check_ins.remove(index);
                check_in.synced = true;
                check_in
            });

        self.state.last_sync_time = Some(Utc::now());
        self.persist().await?;
        Ok(removed)
    }

    /// Drain the whole queue and stamp the sync time, whatever the queue
    /// size. Returns the drained check-ins, flagged as synced, for the
    /// caller to reconcile.
    pub async fn sync_all(&mut self) -> Result<Vec<CheckIn>, ServiceError> {
        let drained = self.drain_pending();
        self.state.last_sync_time = Some(Utc::now());
        self.persist().await?;
        Ok(drained)
    }

    /// Flip connectivity. Only the offline-to-online edge with a non-empty
    /// queue triggers a sync; repeated "online" calls do not.
    pub async fn set_online_status(
        &mut self,
        online: bool,
    ) -> Result<Vec<CheckIn>, ServiceError> {
        let was_online = self.state.is_online;
        self.state.is_online = online;

        if online && !was_online && !self.state.pending_check_ins.is_empty() {
            let drained = self.drain_pending();
            self.state.last_sync_time = Some(Utc::now());
            self.persist().await?;
            return Ok(drained);
        }

        self.persist().await?;
        Ok(Vec::new())
    }

    fn drain_pending(&mut self) -> Vec<CheckIn> {
        self.state
            .pending_check_ins
            .drain(..)
            .map(|mut check_in| {
                check_in.synced = true;
                check_in
            })
            .collect()
    }
}
