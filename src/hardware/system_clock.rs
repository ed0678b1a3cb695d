use super::traits::Clock;
use embassy_time::Instant;

/// Clock backed by the `embassy-time` driver (the board's time driver on target,
/// the `std` driver on the host).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
