#[cfg(any(test, feature = "emulated"))]
pub mod emulated;
pub mod gpio_button;
pub mod system_clock;
pub mod traits;

#[cfg(any(test, feature = "emulated"))]
pub use emulated::{EmulatedFault, EmulatedLine, ManualClock};
pub use gpio_button::{GpioButton, Polarity};
pub use system_clock::SystemClock;
pub use traits::{ButtonPin, Clock, EdgeTrigger, EdgeWait, Level};
