pub mod account_service;
pub mod business_service;
pub mod checkin_service;
pub mod reward_service;
pub mod sync_service;
