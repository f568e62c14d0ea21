pub mod bounded;
pub mod logging;

use chrono::{DateTime, TimeZone, Utc};

pub use bounded::BoundedLog;

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// UTC calendar day (`YYYY-MM-DD`) of a point in time.
pub fn iso_day(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// UTC calendar day of an epoch-millisecond timestamp; `None` when out of range.
pub fn iso_day_of_ms(timestamp_ms: i64) -> Option<String> {
    Utc.timestamp_millis_opt(timestamp_ms).single().map(iso_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_day_is_utc_date() {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(iso_day(at), "2025-03-09");
        assert_eq!(
            iso_day_of_ms(at.timestamp_millis()).as_deref(),
            Some("2025-03-09")
        );
    }
}
