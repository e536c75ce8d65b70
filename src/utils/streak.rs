// utils/streak.rs
use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

/// Bonus schedule for consecutive-day check-ins. A first (or broken) streak
/// earns nothing; longer streaks step up to a 15-point cap.
pub fn streak_bonus(streak_days: i32) -> i32 {
    if streak_days <= 1 {
        0
    } else if streak_days <= 3 {
        5
    } else if streak_days <= 7 {
        10
    } else {
        15
    }
}

/// Whole calendar days between two instants, evaluated in the given offset.
/// Crossing midnight counts as one day no matter how few hours elapsed.
pub fn calendar_days_between(
    earlier: DateTime<Utc>,
    later: DateTime<Utc>,
    offset: FixedOffset,
) -> i64 {
    let earlier = earlier.with_timezone(&offset).date_naive();
    let later = later.with_timezone(&offset).date_naive();
    (later - earlier).num_days()
}

/// UTC instant of the most recent local midnight at or before `now`.
pub fn local_midnight(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let midnight_local = now.with_timezone(&offset).date_naive().and_time(NaiveTime::MIN);
    let midnight_utc = midnight_local - Duration::seconds(offset.local_minus_utc() as i64);
    Utc.from_utc_datetime(&midnight_utc)
}
