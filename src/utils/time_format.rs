use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Human readable age of a post, e.g. "5 minutes ago". Timestamps in the
/// future (clock skew) read as "just now".
pub fn relative_time(created_at: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(*created_at).num_seconds();
    if diff < MINUTE {
        return "just now".to_string();
    }
    if diff < 2 * MINUTE {
        return "a minute ago".to_string();
    }
    if diff < 50 * MINUTE {
        return format!("{} minutes ago", diff / MINUTE);
    }
    if diff < 90 * MINUTE {
        return "an hour ago".to_string();
    }
    if diff < DAY {
        return format!("{} hours ago", diff / HOUR);
    }
    if diff < 2 * DAY {
        return "yesterday".to_string();
    }
    format!("{} days ago", diff / DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ago(secs: i64) -> String {
        let now = Utc.with_ymd_and_hms(2020, 10, 8, 12, 0, 0).unwrap();
        relative_time(&(now - Duration::seconds(secs)), &now)
    }

    #[test]
    fn buckets() {
        assert_eq!(ago(5), "just now");
        assert_eq!(ago(90), "a minute ago");
        assert_eq!(ago(10 * 60), "10 minutes ago");
        assert_eq!(ago(60 * 60), "an hour ago");
        assert_eq!(ago(5 * 60 * 60), "5 hours ago");
        assert_eq!(ago(30 * 60 * 60), "yesterday");
        assert_eq!(ago(4 * 24 * 60 * 60), "4 days ago");
    }

    #[test]
    fn future_timestamp_is_just_now() {
        assert_eq!(ago(-3600), "just now");
    }
}
