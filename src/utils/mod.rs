pub mod format;
pub mod otp_generator;
pub mod phone;
pub mod rewards;
pub mod streak;
