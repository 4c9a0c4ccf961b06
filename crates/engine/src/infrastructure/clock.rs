//! Wall-clock sources for document timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::infrastructure::ports::ClockPort;

/// Real time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// `updated_at` value written next to a stored document: UTC, second precision,
/// `Z` suffix.
pub fn document_stamp(clock: &dyn ClockPort) -> String {
    clock.now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Always answers the same instant.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
