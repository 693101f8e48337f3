use std::time::{Duration, Instant};

/// How many movies the featured window shows at once.
pub const FEATURED_WINDOW: usize = 5;

/// Rotating index over the featured result window. The position is derived
/// from elapsed wall time, so concurrent requests share it without locking
/// and there is nothing to persist.
pub struct FeaturedRotation {
    epoch: Instant,
    interval: Duration,
    window: usize,
}

impl FeaturedRotation {
    pub fn new(interval: Duration) -> Self {
        Self {
            epoch: Instant::now(),
            interval,
            window: FEATURED_WINDOW,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Current start index into a window of `len` movies.
    pub fn position(&self, len: usize) -> usize {
        self.position_at(self.epoch.elapsed(), len)
    }

    fn position_at(&self, elapsed: Duration, len: usize) -> usize {
        if len <= self.window {
            return 0;
        }
        let ticks = (elapsed.as_secs() / self.interval.as_secs().max(1)) as usize;
        ticks % (len - self.window + 1)
    }
}
