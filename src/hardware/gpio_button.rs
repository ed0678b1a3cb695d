use super::traits::{ButtonPin, EdgeTrigger, EdgeWait, Level};
use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal_async::digital::Wait;

/// Electrical level at which the button counts as pressed.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Pressed pulls the line low (pull-up wiring)
    ActiveLow,
    /// Pressed drives the line high (pull-down wiring)
    ActiveHigh,
}

/// Push-button on an interrupt-capable input, e.g. an `embassy_stm32::exti::ExtiInput`.
///
/// The pin type is an input by construction, so configuring it as one cannot fail.
/// Edge triggering is a software gate: while disabled, [`EdgeWait::wait_for_edge`]
/// parks forever.
pub struct GpioButton<P> {
    pin: P,
    polarity: Polarity,
    trigger: EdgeTrigger,
}

impl<P> GpioButton<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self {
            pin,
            polarity,
            trigger: EdgeTrigger::Disabled,
        }
    }

    pub fn trigger(&self) -> EdgeTrigger {
        self.trigger
    }
}

impl<P: InputPin> ButtonPin for GpioButton<P> {
    type Error = <P as ErrorType>::Error;

    fn is_ready(&self) -> bool {
        true
    }

    fn configure_as_input(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn configure_interrupt(&mut self, trigger: EdgeTrigger) -> Result<(), Self::Error> {
        self.trigger = trigger;
        Ok(())
    }

    fn level(&mut self) -> Result<Level, Self::Error> {
        let high = self.pin.is_high()?;
        let active = match self.polarity {
            Polarity::ActiveLow => !high,
            Polarity::ActiveHigh => high,
        };
        Ok(if active { Level::Active } else { Level::Inactive })
    }
}

impl<P: InputPin + Wait> EdgeWait for GpioButton<P> {
    async fn wait_for_edge(&mut self) -> Result<(), Self::Error> {
        if self.trigger == EdgeTrigger::Disabled {
            core::future::pending::<()>().await;
        }
        self.pin.wait_for_any_edge().await
    }
}
