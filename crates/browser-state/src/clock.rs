//! Time source for last-access stamps

use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch; never smaller than a previous result
    fn now_millis(&self) -> i64;
}

/// Wall clock that never goes backwards
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let previous = self.last.fetch_max(now, Ordering::SeqCst);
        previous.max(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        // pretend an earlier reading came from a clock that was ahead
        let ahead = chrono::Utc::now().timestamp_millis() + 60_000;
        clock.last.store(ahead, Ordering::SeqCst);

        assert_eq!(clock.now_millis(), ahead);

        let mut previous = 0;
        for _ in 0..100 {
            let now = clock.now_millis();
            assert!(now >= previous);
            previous = now;
        }
    }
}
