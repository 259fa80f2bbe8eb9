//! Manually advanced clock for cache TTL tests.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::RwLock;

/// Clock that only moves when a test advances it.
#[derive(Debug)]
pub struct FakeClock {
    now: RwLock<DateTime<Utc>>,
}

impl FakeClock {
    /// Creates a clock pinned at the given instant.
    pub const fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        #[expect(clippy::unwrap_used, reason = "test clock; poisoned lock is a test bug")]
        let mut now = self.now.write().unwrap();
        *now = *now + delta;
    }
}

impl Clock for FakeClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        #[expect(clippy::unwrap_used, reason = "test clock; poisoned lock is a test bug")]
        let now = self.now.read().unwrap();
        *now
    }
}
