use embassy_time::Instant;

/// Logical level of the button line after polarity is applied.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Button held down
    Active,
    /// Button at rest
    Inactive,
}

/// Interrupt trigger configuration for the button line.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTrigger {
    Disabled,
    BothEdges,
}

/// A digital input wired to a push-button.
pub trait ButtonPin {
    type Error;

    /// Whether the GPIO controller behind the pin can be used.
    fn is_ready(&self) -> bool;

    fn configure_as_input(&mut self) -> Result<(), Self::Error>;

    fn configure_interrupt(&mut self, trigger: EdgeTrigger) -> Result<(), Self::Error>;

    fn level(&mut self) -> Result<Level, Self::Error>;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level()? == Level::Active)
    }
}

/// Source of edge notifications for a [`ButtonPin`].
///
/// Resolves once per edge while [`EdgeTrigger::BothEdges`] is configured and never
/// resolves while triggering is disabled.
#[allow(async_fn_in_trait)]
pub trait EdgeWait: ButtonPin {
    async fn wait_for_edge(&mut self) -> Result<(), Self::Error>;
}

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
