// config.rs
use chrono::{FixedOffset, Offset, Utc};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Offset from UTC, in minutes, used for every calendar-day decision
    /// (streak continuation, "today" report windows, the daily spin guard).
    pub utc_offset_minutes: i32,
    pub referral_bonus: i32,
    pub default_points_per_visit: i32,
    pub default_streak_bonus: i32,
}

impl Config {
    pub fn init() -> Config {
        dotenv::dotenv().ok();

        let database_url = std::env::var("LOOPLOCAL_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite::memory:".to_string());

        let utc_offset_minutes = std::env::var("LOOPLOCAL_UTC_OFFSET_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(0);

        let referral_bonus = std::env::var("LOOPLOCAL_REFERRAL_BONUS")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(10);

        let default_points_per_visit = std::env::var("LOOPLOCAL_POINTS_PER_VISIT")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(10);

        let default_streak_bonus = std::env::var("LOOPLOCAL_STREAK_BONUS")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(5);

        Config {
            database_url,
            utc_offset_minutes,
            referral_bonus,
            default_points_per_visit,
            default_streak_bonus,
        }
    }

    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            utc_offset_minutes: 0,
            referral_bonus: 10,
            default_points_per_visit: 10,
            default_streak_bonus: 5,
        }
    }
}
