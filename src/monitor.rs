//! Button press/release/long-press state machine
//!
//! The pin's live level is the only source of truth for pressed/released. The monitor
//! re-reads the pin on every edge and compares it with the level it last observed, so a
//! redundant edge never flips it out of step with the hardware. Besides that level it
//! keeps the instant of the press that has not been released yet.
//!
//! A release edge that the edge source drops (e.g. one that lands while the previous edge
//! is still being handled) shows up as two active readings in a row. The second one is
//! treated as redundant and the press keeps its original timestamp, so the next release
//! is timed from the earlier press. Re-stamping instead would let contact noise in the
//! middle of a hold cut the measured time short and hide a genuine long press.

use embassy_time::{Duration, Instant, Timer};

use crate::channel::EventChannel;
use crate::config::{ButtonConfig, EDGE_RETRY_DELAY};
use crate::error::{ConfigStage, Error};
use crate::event::ButtonEvent;
use crate::hardware::traits::{ButtonPin, Clock, EdgeTrigger, EdgeWait, Level};
use crate::hardware::SystemClock;

/// Outcome of classifying one edge.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Level unchanged since the previous edge
    Redundant,
    /// Button went down at `at`
    Press { at: Instant },
    /// Button came up after `held`, short of the long press threshold. `held` is zero
    /// when no press was recorded, e.g. the button was already down at boot.
    Release { held: Duration },
    /// Button came up after `held`, at or beyond the long press threshold
    LongPress { held: Duration },
}

impl Transition {
    /// Events to publish for this transition, in publish order.
    pub const fn events(&self) -> &'static [ButtonEvent] {
        match self {
            Transition::Redundant => &[],
            Transition::Press { .. } => &[ButtonEvent::Pressed],
            Transition::Release { .. } => &[ButtonEvent::Released],
            Transition::LongPress { .. } => &[ButtonEvent::Released, ButtonEvent::LongPress],
        }
    }
}

/// Classifies the edges of one push-button and publishes the result.
///
/// # Generic parameters
/// - `P`: the button line, see [`ButtonPin`] and [`EdgeWait`]
/// - `C`: monotonic time source, [`SystemClock`] on hardware
pub struct ButtonMonitor<'a, P, C = SystemClock> {
    pin: P,
    clock: C,
    events: &'a EventChannel,
    config: ButtonConfig,
    level: Level,
    press_timestamp: Option<Instant>,
}

impl<'a, P, C> ButtonMonitor<'a, P, C>
where
    P: ButtonPin,
    C: Clock,
{
    pub fn new(pin: P, clock: C, events: &'a EventChannel, config: ButtonConfig) -> Self {
        Self {
            pin,
            clock,
            events,
            config,
            level: Level::Inactive,
            press_timestamp: None,
        }
    }

    /// Check the controller and configure the pin as a digital input.
    ///
    /// Leaves the monitor with no press recorded and the line's current level as the
    /// starting point, so a button held at boot reports a release when let go.
    ///
    /// # Errors
    /// - [`Error::DeviceNotReady`] if the GPIO controller is not ready
    /// - [`Error::Configuration`] with [`ConfigStage::Input`] if the platform rejects the pin mode
    pub fn init(&mut self) -> Result<(), Error<P::Error>> {
        if !self.pin.is_ready() {
            error!("button device is not ready");
            return Err(Error::DeviceNotReady);
        }

        self.pin.configure_as_input().map_err(|source| {
            error!("failed to configure button pin as input");
            Error::Configuration {
                stage: ConfigStage::Input,
                source,
            }
        })?;

        self.level = match self.pin.level() {
            Ok(level) => level,
            Err(_) => {
                warn!("failed to read initial button level, assuming released");
                Level::Inactive
            }
        };
        self.press_timestamp = None;
        info!(
            "button ready, long press after {} ms",
            self.config.long_press_threshold.as_millis()
        );
        Ok(())
    }

    /// Enable both-edge triggering so edges start reaching [`on_edge`](Self::on_edge).
    ///
    /// On failure the trigger is switched back off before the error is returned.
    pub fn enable_interrupts(&mut self) -> Result<(), Error<P::Error>> {
        if let Err(source) = self.pin.configure_interrupt(EdgeTrigger::BothEdges) {
            error!("failed to configure interrupt on button pin");
            if self.pin.configure_interrupt(EdgeTrigger::Disabled).is_err() {
                warn!("could not disable button interrupt after failed configuration");
            }
            return Err(Error::Configuration {
                stage: ConfigStage::Interrupt,
                source,
            });
        }

        debug!("button interrupt enabled on both edges");
        Ok(())
    }

    /// Edge handler: read the pin, classify, publish 0-2 events.
    ///
    /// Never blocks and never fails; a pin that cannot be read yields no event.
    pub fn on_edge(&mut self) {
        let level = match self.pin.level() {
            Ok(level) => level,
            Err(_) => {
                warn!("failed to read button level, edge ignored");
                return;
            }
        };
        let now = self.clock.now();

        for &event in self.classify(level, now).events() {
            self.events.publish(event);
        }
    }

    /// Advance the state machine for an edge that left the line at `level` at `now`.
    pub fn classify(&mut self, level: Level, now: Instant) -> Transition {
        if level == self.level {
            debug!("redundant button edge");
            return Transition::Redundant;
        }
        self.level = level;

        if level == Level::Active {
            self.press_timestamp = Some(now);
            info!("button pressed at {} ms", now.as_millis());
            return Transition::Press { at: now };
        }

        // No recorded press: the button was already down when we started watching.
        let held = self
            .press_timestamp
            .take()
            .and_then(|pressed_at| now.checked_duration_since(pressed_at))
            .unwrap_or(Duration::from_ticks(0));
        info!(
            "button released at {} ms, held {} ms",
            now.as_millis(),
            held.as_millis()
        );

        if held >= self.config.long_press_threshold {
            info!("button long pressed");
            Transition::LongPress { held }
        } else {
            Transition::Release { held }
        }
    }

    /// Whether a press has been seen and not yet released.
    pub fn is_pressed(&self) -> bool {
        self.press_timestamp.is_some()
    }

    pub fn press_timestamp(&self) -> Option<Instant> {
        self.press_timestamp
    }
}

impl<P, C> ButtonMonitor<'_, P, C>
where
    P: EdgeWait,
    C: Clock,
{
    /// Dispatch every edge of the line to [`on_edge`](Self::on_edge), forever.
    ///
    /// Edges only arrive once [`enable_interrupts`](Self::enable_interrupts) succeeded.
    pub async fn run(&mut self) -> ! {
        loop {
            match self.pin.wait_for_edge().await {
                Ok(()) => self.on_edge(),
                Err(_) => {
                    warn!("waiting for button edge failed, retrying");
                    Timer::after(EDGE_RETRY_DELAY).await;
                }
            }
        }
    }
}
