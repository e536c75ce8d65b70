// utils/format.rs
use chrono::{DateTime, FixedOffset, Utc};

pub fn format_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp
        .with_timezone(&offset)
        .format("%b %-d, %Y")
        .to_string()
}

pub fn format_time(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp
        .with_timezone(&offset)
        .format("%I:%M %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Offset;

    #[test]
    fn date_and_time_render_in_display_form() {
        let ts: DateTime<Utc> = "2026-03-04T14:05:00Z".parse().expect("test timestamp");
        assert_eq!(format_date(ts, Utc.fix()), "Mar 4, 2026");
        assert_eq!(format_time(ts, Utc.fix()), "02:05 PM");
    }

    #[test]
    fn rendering_respects_the_offset() {
        let ts: DateTime<Utc> = "2026-03-04T23:30:00Z".parse().expect("test timestamp");
        let plus_one = FixedOffset::east_opt(3600).expect("offset");
        assert_eq!(format_date(ts, plus_one), "Mar 5, 2026");
        assert_eq!(format_time(ts, plus_one), "12:30 AM");
    }
}
