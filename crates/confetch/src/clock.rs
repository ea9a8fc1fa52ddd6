//! Wall-clock abstraction.
//!
//! The cache compares stored timestamps against "now"; injecting the clock
//! keeps that comparison deterministic in tests.

use chrono::Utc;

/// Source of the current wall-clock time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
