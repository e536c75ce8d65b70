pub mod config;
pub mod db;
pub mod dtos;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod utils;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;

use crate::config::Config;
use crate::db::db::DBClient;
use crate::error::ServiceError;
use crate::service::account_service::AccountService;
use crate::service::business_service::BusinessService;
use crate::service::checkin_service::CheckInService;
use crate::service::reward_service::RewardService;
use crate::service::sync_service::SyncService;
use crate::store::businessstore::BusinessStore;
use crate::store::notificationstore::NotificationStore;
use crate::store::syncstore::SyncStore;
use crate::store::userstore::UserStore;

/// Everything the embedding UI needs: the four stores and the services
/// that coordinate them.
#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    // Stores
    pub user_store: Arc<Mutex<UserStore>>,
    pub business_store: Arc<Mutex<BusinessStore>>,
    pub notification_store: Arc<Mutex<NotificationStore>>,
    pub sync_store: Arc<Mutex<SyncStore>>,
    // Services
    pub account_service: Arc<AccountService>,
    pub business_service: Arc<BusinessService>,
    pub checkin_service: Arc<CheckInService>,
    pub reward_service: Arc<RewardService>,
    pub sync_service: Arc<SyncService>,
}

impl AppState {
    /// Open the local database and bring every store back from its
    /// persisted state.
    pub async fn init(config: Config) -> Result<Self, ServiceError> {
        let db_client = Arc::new(DBClient::connect(&config.database_url).await?);

        let user_store = Arc::new(Mutex::new(
            UserStore::load(db_client.clone(), &config).await?,
        ));
        let business_store = Arc::new(Mutex::new(
            BusinessStore::load(db_client.clone(), &config).await?,
        ));
        let notification_store = Arc::new(Mutex::new(
            NotificationStore::load(db_client.clone()).await?,
        ));
        let sync_store = Arc::new(Mutex::new(SyncStore::load(db_client.clone()).await?));

        let account_service = Arc::new(AccountService::new(user_store.clone()));
        let business_service = Arc::new(BusinessService::new(business_store.clone()));
        let checkin_service = Arc::new(CheckInService::new(
            user_store.clone(),
            business_store.clone(),
            sync_store.clone(),
            notification_store.clone(),
        ));
        let reward_service = Arc::new(RewardService::new(
            user_store.clone(),
            business_store.clone(),
            notification_store.clone(),
            &config,
        ));
        let sync_service = Arc::new(SyncService::new(user_store.clone(), sync_store.clone()));

        Ok(Self {
            env: config,
            db_client,
            user_store,
            business_store,
            notification_store,
            sync_store,
            account_service,
            business_service,
            checkin_service,
            reward_service,
            sync_service,
        })
    }
}

/// Console logging for hosts that have not installed their own subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .try_init();
}
