//! Clock port.

use crate::domain::foundation::Timestamp;

/// Source of the current time.
///
/// Production code injects [`SystemClock`]; tests inject a settable clock so
/// session expiry can be exercised without waiting.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
