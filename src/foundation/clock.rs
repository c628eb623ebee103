use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use crate::foundation::core::Millis;

/// Monotonic millisecond clock shared by the host and the effect.
pub trait Clock: Send + Sync {
    /// Current monotonic time in milliseconds. May wrap.
    fn now_ms(&self) -> Millis;
}

/// Wall-clock backed [`Clock`], counting from construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        // Truncation wraps the same way a 32-bit compositor clock does.
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Manually advanced [`Clock`] for tests and offline rendering.
///
/// Clones share the same underlying time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU32>,
}

impl ManualClock {
    /// Create a clock reading `start_ms`.
    pub fn new(start_ms: Millis) -> Self {
        Self {
            now: Arc::new(AtomicU32::new(start_ms)),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, ms: Millis) {
        self.now.store(ms, Ordering::SeqCst);
    }

    /// Move forward by `ms`, wrapping at `u32::MAX`.
    pub fn advance(&self, ms: Millis) {
        // fetch_add on atomics wraps on overflow.
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/clock.rs"]
mod tests;
