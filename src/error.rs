//! Error types for the button monitor and its event channel
//!
//! - [`Error`] - Pin bring-up failures from [`ButtonMonitor::init`](crate::ButtonMonitor::init)
//!   and [`ButtonMonitor::enable_interrupts`](crate::ButtonMonitor::enable_interrupts)
//! - [`ChannelError`] - Subscription failures on an [`EventChannel`](crate::EventChannel)
//!
//! Once interrupts are enabled, edge handling has no error surface; see
//! [`ButtonMonitor::on_edge`](crate::ButtonMonitor::on_edge).

/// Configuration step that the platform rejected
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStage {
    /// Configuring the pin as a digital input
    Input,
    /// Enabling both-edge interrupt triggering
    Interrupt,
}

/// Errors that can occur while bringing up the button pin
///
/// Generic over the pin's error type so callers can match on the platform error.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The GPIO controller behind the pin is not ready
    DeviceNotReady,
    /// The platform rejected a pin or interrupt configuration
    Configuration {
        /// Which configuration step failed
        stage: ConfigStage,
        /// Error reported by the platform
        source: E,
    },
}

impl<E> Error<E> {
    /// Platform error carried by a configuration failure
    pub fn platform_error(&self) -> Option<&E> {
        match self {
            Error::DeviceNotReady => None,
            Error::Configuration { source, .. } => Some(source),
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::DeviceNotReady => write!(f, "Button device is not ready"),
            Error::Configuration {
                stage: ConfigStage::Input,
                source,
            } => write!(f, "Failed to configure button pin as input: {source:?}"),
            Error::Configuration {
                stage: ConfigStage::Interrupt,
                source,
            } => write!(f, "Failed to configure interrupt on button pin: {source:?}"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

/// Errors returned by [`EventChannel`](crate::EventChannel)
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// All subscriber slots are taken
    SubscriberLimit,
}

impl core::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChannelError::SubscriberLimit => write!(
                f,
                "Subscriber limit reached (max {})",
                crate::config::MAX_SUBSCRIBERS
            ),
        }
    }
}

impl core::error::Error for ChannelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failed_stage() {
        let err: Error<i32> = Error::Configuration {
            stage: ConfigStage::Interrupt,
            source: -5,
        };
        assert_eq!(
            err.to_string(),
            "Failed to configure interrupt on button pin: -5"
        );
        assert_eq!(err.platform_error(), Some(&-5));
    }

    #[test]
    fn device_not_ready_has_no_source() {
        let err: Error<i32> = Error::DeviceNotReady;
        assert_eq!(err.platform_error(), None);
        assert_eq!(err.to_string(), "Button device is not ready");
    }
}
