use embassy_time::Duration;

/// Hold time at or beyond which a release is also reported as a long press.
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(3000);

/// Events buffered per channel before the oldest one is evicted.
pub const EVENT_QUEUE_DEPTH: usize = 4;

/// Maximum number of live subscriptions on one channel.
pub const MAX_SUBSCRIBERS: usize = 3;

/// Maximum number of counted publishers. The monitor publishes through an
/// uncounted immediate publisher, so this only limits extra producers.
pub const MAX_PUBLISHERS: usize = 1;

/// Back-off after the edge source reports an error, so a broken line does not spin the executor.
pub const EDGE_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Classification parameters for a [`ButtonMonitor`](crate::ButtonMonitor).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    /// A release whose hold time is `>=` this value is followed by a long press event.
    pub long_press_threshold: Duration,
}

impl ButtonConfig {
    pub const fn new() -> Self {
        Self {
            long_press_threshold: LONG_PRESS_THRESHOLD,
        }
    }

    pub const fn with_long_press_threshold(mut self, threshold: Duration) -> Self {
        self.long_press_threshold = threshold;
        self
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::new()
    }
}
