use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Simulated wall clock. Sessions advance it by one tick interval per tick so
/// labels stay deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    now: NaiveDateTime,
}

impl SimClock {
    pub fn starting_at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Saturates at the end of the representable range instead of overflowing.
    pub fn advance_ms(&mut self, ms: u64) -> NaiveDateTime {
        self.now = self
            .now
            .checked_add_signed(duration_ms(ms))
            .unwrap_or(NaiveDateTime::MAX);
        self.now
    }
}

impl Default for SimClock {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 7, 28)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap_or(NaiveDateTime::MIN);
        Self::starting_at(start)
    }
}

pub fn duration_ms(ms: u64) -> Duration {
    i64::try_from(ms)
        .ok()
        .and_then(Duration::try_milliseconds)
        .unwrap_or(Duration::MAX)
}

/// `at` moved back by `ms`, saturating at the start of the representable range.
pub fn rewind_ms(at: NaiveDateTime, ms: u64) -> NaiveDateTime {
    at.checked_sub_signed(duration_ms(ms))
        .unwrap_or(NaiveDateTime::MIN)
}

pub fn history_label(at: NaiveDateTime) -> String {
    at.format("%H:%M:%S").to_string()
}

pub fn alert_label(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}
