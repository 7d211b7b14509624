//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Values outside chrono's representable range collapse to the epoch.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Whole days elapsed from `earlier` to `self`, rounded toward negative
    /// infinity.
    pub fn whole_days_since(&self, earlier: &Timestamp) -> i64 {
        self.0
            .signed_duration_since(earlier.0)
            .num_milliseconds()
            .div_euclid(MILLIS_PER_DAY)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration as ChronoDuration};

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_from_unix_secs_works() {
        // 2024-01-15T00:00:00Z
        let ts = Timestamp::from_unix_secs(1705276800);
        assert_eq!(ts.as_datetime().year(), 2024);
        assert_eq!(ts.as_datetime().month(), 1);
        assert_eq!(ts.as_datetime().day(), 15);
    }

    #[test]
    fn timestamp_from_zero_is_epoch() {
        assert_eq!(Timestamp::from_unix_secs(0).as_unix_secs(), 0);
    }

    #[test]
    fn whole_days_since_floors_partial_days() {
        let start = Timestamp::from_unix_secs(1705276800);
        let later = Timestamp::from_datetime(
            *start.as_datetime() + ChronoDuration::days(3) + ChronoDuration::hours(23),
        );
        assert_eq!(later.whole_days_since(&start), 3);
    }

    #[test]
    fn whole_days_since_is_negative_for_future_reference() {
        let start = Timestamp::from_unix_secs(1705276800);
        let earlier = Timestamp::from_datetime(*start.as_datetime() - ChronoDuration::hours(1));
        assert_eq!(earlier.whole_days_since(&start), -1);
    }

    #[test]
    fn minus_days_moves_backwards() {
        let ts = Timestamp::from_unix_secs(1705276800);
        assert_eq!(ts.minus_days(10).whole_days_since(&ts), -10);
        assert_eq!(ts.whole_days_since(&ts.minus_days(10)), 10);
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts.as_datetime().year(), 2024);
    }
}
