//! Timestamp-derived record identifiers.
//!
//! Ids are the current Unix time in milliseconds rendered as a string. Two
//! calls within the same millisecond (or a clock that steps backwards) would
//! collide, so the generator never returns a value at or below the last one
//! it issued or observed.

use chrono::Utc;
use tracing::warn;

/// How far ahead of the clock an observed id may be, in milliseconds.
pub const MAX_CLOCK_SKEW_MS: i64 = 365 * 24 * 60 * 60 * 1000;

#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: i64,
    clock: fn() -> i64,
}

fn wall_clock_ms() -> i64 {
    Utc::now().timestamp_millis()
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_clock(wall_clock_ms)
    }

    /// Generator reading time from `clock` (milliseconds since the epoch).
    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self { last: 0, clock }
    }

    /// Issue the next id.
    pub fn next_id(&mut self) -> String {
        let now = (self.clock)();
        self.last = now.max(self.last.saturating_add(1));
        self.last.to_string()
    }

    /// Account for an id that already exists, so later ids sort after it.
    /// Non-numeric ids and ids more than [`MAX_CLOCK_SKEW_MS`] ahead of the
    /// clock are ignored.
    pub fn observe(&mut self, id: &str) {
        let Ok(n) = id.parse::<i64>() else {
            return;
        };
        if n > (self.clock)().saturating_add(MAX_CLOCK_SKEW_MS) {
            warn!(id, "ignoring stored id far ahead of the clock");
            return;
        }
        self.last = self.last.max(n);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frozen() -> i64 {
        1_748_736_000_000
    }

    #[test]
    fn same_millisecond_ids_are_distinct() {
        let mut ids = IdGenerator::with_clock(frozen);
        let a = ids.next_id();
        let b = ids.next_id();
        assert_eq!(a, "1748736000000");
        assert_eq!(b, "1748736000001");
    }

    #[test]
    fn observed_ids_push_the_floor_up() {
        let mut ids = IdGenerator::with_clock(frozen);
        ids.observe("1748736000500");
        ids.observe("not-a-number");
        assert_eq!(ids.next_id(), "1748736000501");
    }

    #[test]
    fn far_future_ids_do_not_exhaust_the_sequence() {
        let mut ids = IdGenerator::with_clock(frozen);
        ids.observe(&i64::MAX.to_string());
        assert_eq!(ids.next_id(), "1748736000000");
        assert_eq!(ids.next_id(), "1748736000001");
    }

    #[test]
    fn next_id_saturates_instead_of_wrapping() {
        fn end_of_time() -> i64 {
            i64::MAX
        }
        let mut ids = IdGenerator::with_clock(end_of_time);
        ids.observe(&i64::MAX.to_string());
        assert_eq!(ids.next_id(), i64::MAX.to_string());
    }

    #[test]
    fn wall_clock_ids_are_numeric() {
        let mut ids = IdGenerator::new();
        let id = ids.next_id();
        assert!(id.parse::<i64>().unwrap() > 0);
    }
}
