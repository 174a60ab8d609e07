//! Clock abstraction and timestamp helpers.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Injected wherever messages or rooms are stamped, so stamping is
/// deterministic under test.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds (UTC).
    fn now_millis(&self) -> i64;
}

/// Clock backed by actual system time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        utc_timestamp()
    }
}

/// Clock that always returns the same instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Current Unix timestamp in milliseconds (UTC).
pub fn utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a Unix millisecond timestamp as RFC 3339 (UTC).
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| format!("out-of-range timestamp {timestamp_millis}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_positive_timestamp() {
        // given:
        let clock = SystemClock;

        // when:
        let timestamp = clock.now_millis();

        // then:
        assert!(timestamp > 0);
    }

    #[test]
    fn test_system_clock_timestamps_do_not_go_backwards() {
        // given:
        let clock = SystemClock;

        // when:
        let first = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = clock.now_millis();

        // then:
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock_returns_the_configured_instant() {
        // given:
        let clock = FixedClock::new(1_234_567_890_123);

        // when:
        let timestamp = clock.now_millis();

        // then:
        assert_eq!(timestamp, 1_234_567_890_123);
    }

    #[test]
    fn test_fixed_clock_is_stable_across_calls() {
        // given:
        let clock = FixedClock::new(9_876_543_210_987);

        // when:
        let first = clock.now_millis();
        let second = clock.now_millis();

        // then:
        assert_eq!(first, 9_876_543_210_987);
        assert_eq!(second, first);
    }

    #[test]
    fn test_timestamp_renders_as_rfc3339_utc() {
        // given: 2023-01-01 00:00:00 UTC in milliseconds
        let timestamp = 1_672_531_200_000;

        // when:
        let rendered = timestamp_to_rfc3339(timestamp);

        // then:
        assert!(rendered.starts_with("2023-01-01T00:00:00"));
        assert!(rendered.contains("+00:00"));
    }

    #[test]
    fn test_timestamp_rendering_keeps_milliseconds() {
        // given:
        let timestamp = 1_672_531_200_123;

        // when:
        let rendered = timestamp_to_rfc3339(timestamp);

        // then:
        assert!(rendered.starts_with("2023-01-01T00:00:00.123"));
    }

    #[test]
    fn test_out_of_range_timestamp_does_not_panic() {
        // given:
        let timestamp = i64::MAX;

        // when:
        let rendered = timestamp_to_rfc3339(timestamp);

        // then:
        assert!(rendered.contains("out-of-range"));
    }
}
