pub mod businessstore;
pub mod notificationstore;
pub mod syncstore;
pub mod userstore;
