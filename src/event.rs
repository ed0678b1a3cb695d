/// Classification of a button interaction, as carried on the event channel.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Placeholder for message buffers that have not been filled yet. Never published.
    #[default]
    Undefined,
    /// The button went from inactive to active.
    Pressed,
    /// The button went from active to inactive.
    Released,
    /// The release just published closed a press held for at least the long press threshold.
    LongPress,
}

impl ButtonEvent {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ButtonEvent::Undefined => "undefined",
            ButtonEvent::Pressed => "pressed",
            ButtonEvent::Released => "released",
            ButtonEvent::LongPress => "long press",
        }
    }
}

impl core::fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
