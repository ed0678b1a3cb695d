//! Push-button event monitor
//! =============================================================================================
//!
//! Reads a single push-button through a GPIO pin, classifies every interaction as a press,
//! a release or a long press, and broadcasts each classification on an in-process
//! publish/subscribe channel.
//!
//! - [`channel`]: bounded, multi-subscriber broadcast of [`ButtonEvent`]s
//! - [`monitor`]: edge-driven press/release/long-press state machine
//! - [`hardware`]: pin, edge and clock abstractions plus their adapters
//!
//!==============================================================================================

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channel;
pub mod config;
pub mod error;
pub mod event;
pub mod hardware;
pub mod monitor;

pub use channel::{BUTTON_EVENTS, EventChannel, Subscription};
pub use config::ButtonConfig;
pub use error::{ChannelError, ConfigStage, Error};
pub use event::ButtonEvent;
pub use monitor::ButtonMonitor;
