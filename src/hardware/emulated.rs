//! Emulated button line and clock
//!
//! Host-side stand-ins for the GPIO controller and the time driver, so the monitor can be
//! driven through full press/release scripts without hardware. Both use interior
//! mutability: the monitor owns a `&EmulatedLine` while the test keeps toggling the level.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant};

use super::traits::{ButtonPin, Clock, EdgeTrigger, EdgeWait, Level};

/// Error code reported by an emulated controller, in the style of a negative errno.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatedFault(pub i32);

impl EmulatedFault {
    pub const EIO: Self = Self(-5);
    pub const ENOTSUP: Self = Self(-134);
}

/// An emulated GPIO line with a push-button attached.
pub struct EmulatedLine {
    level: Cell<Level>,
    ready: Cell<bool>,
    input_configured: Cell<bool>,
    trigger: Cell<EdgeTrigger>,
    input_fault: Cell<Option<EmulatedFault>>,
    interrupt_fault: Cell<Option<EmulatedFault>>,
    level_fault: Cell<Option<EmulatedFault>>,
    edge_fault: Cell<Option<EmulatedFault>>,
    edge: Signal<CriticalSectionRawMutex, ()>,
}

impl EmulatedLine {
    pub const fn new(level: Level) -> Self {
        Self {
            level: Cell::new(level),
            ready: Cell::new(true),
            input_configured: Cell::new(false),
            trigger: Cell::new(EdgeTrigger::Disabled),
            input_fault: Cell::new(None),
            interrupt_fault: Cell::new(None),
            level_fault: Cell::new(None),
            edge_fault: Cell::new(None),
            edge: Signal::new(),
        }
    }

    pub fn press(&self) {
        self.set_level(Level::Active);
    }

    pub fn release(&self) {
        self.set_level(Level::Inactive);
    }

    /// Drive the line. Raises an edge if the level changed and triggering is enabled.
    pub fn set_level(&self, level: Level) {
        let previous = self.level.replace(level);
        if previous != level {
            self.raise_edge();
        }
    }

    /// Raise an edge notification without changing the level, as contact noise would.
    pub fn raise_spurious_edge(&self) {
        self.raise_edge();
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    /// Make the next input configuration fail with `fault`.
    pub fn fail_input_config(&self, fault: EmulatedFault) {
        self.input_fault.set(Some(fault));
    }

    /// Make the next interrupt configuration fail with `fault`. The trigger is still
    /// applied, as a controller that rejects the request half way would leave it.
    pub fn fail_interrupt_config(&self, fault: EmulatedFault) {
        self.interrupt_fault.set(Some(fault));
    }

    /// Make the next level read fail with `fault`.
    pub fn fail_level_read(&self, fault: EmulatedFault) {
        self.level_fault.set(Some(fault));
    }

    /// Make the next edge wait fail with `fault` instead of waiting.
    pub fn fail_edge_wait(&self, fault: EmulatedFault) {
        self.edge_fault.set(Some(fault));
    }

    pub fn level(&self) -> Level {
        self.level.get()
    }

    pub fn trigger(&self) -> EdgeTrigger {
        self.trigger.get()
    }

    pub fn is_input(&self) -> bool {
        self.input_configured.get()
    }

    fn raise_edge(&self) {
        if self.trigger.get() == EdgeTrigger::BothEdges {
            self.edge.signal(());
        }
    }
}

impl ButtonPin for &EmulatedLine {
    type Error = EmulatedFault;

    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn configure_as_input(&mut self) -> Result<(), EmulatedFault> {
        if let Some(fault) = self.input_fault.take() {
            return Err(fault);
        }
        self.input_configured.set(true);
        Ok(())
    }

    fn configure_interrupt(&mut self, trigger: EdgeTrigger) -> Result<(), EmulatedFault> {
        self.trigger.set(trigger);
        if trigger == EdgeTrigger::Disabled {
            self.edge.reset();
        }
        match self.interrupt_fault.take() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    fn level(&mut self) -> Result<Level, EmulatedFault> {
        match self.level_fault.take() {
            Some(fault) => Err(fault),
            None => Ok(self.level.get()),
        }
    }
}

impl EdgeWait for &EmulatedLine {
    async fn wait_for_edge(&mut self) -> Result<(), EmulatedFault> {
        if let Some(fault) = self.edge_fault.take() {
            return Err(fault);
        }
        self.edge.wait().await;
        Ok(())
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    ticks: Cell<u64>,
}

impl ManualClock {
    pub const fn new() -> Self {
        Self {
            ticks: Cell::new(0),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.ticks.set(self.ticks.get() + by.as_ticks());
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.ticks.get())
    }
}
