//! STM32 Blue Pill Button Event Monitor
//! =============================================================================================
//!
//! This firmware classifies a single push-button and broadcasts the result:
//! - Press / release detection on both edges via EXTI
//! - Long press (held >= 3 s) reported right after the release
//! - Events published on the BUTTON_EVENTS pub-sub channel
//!
//! Hardware Connections:
//!   Button -> Blue Pill
//!      one leg -> PB1 (internal pull-up enabled)
//!      other   -> GND
//!
//! Expected Behavior:
//!   - "pressed" / "released" logged on every short press
//!   - "released" followed by "long press" when held for 3 s or more
//!   - An idle notice every second while nothing happens (debug level)

#![no_std]
#![no_main]

use button_monitor::{
    BUTTON_EVENTS, ButtonConfig, ButtonMonitor, Subscription,
    hardware::{GpioButton, Polarity, SystemClock},
};
use embassy_executor::Spawner;
use embassy_stm32::{exti::ExtiInput, gpio::Pull};
use embassy_time::Duration;
use {defmt_rtt as _, panic_probe as _}; // Global logger and panic handler

type BlueButton = GpioButton<ExtiInput<'static>>;

/// Main application entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Initialize microcontroller peripherals with default configuration
    let p = embassy_stm32::init(Default::default());

    defmt::info!("Button is running on the STM32F103C8 Blue Pill");

    // PB1 with pull-up: pressing the button pulls the line low
    let button = GpioButton::new(ExtiInput::new(p.PB1, p.EXTI1, Pull::Up), Polarity::ActiveLow);
    let mut monitor = ButtonMonitor::new(
        button,
        SystemClock,
        &BUTTON_EVENTS,
        ButtonConfig::default(),
    );

    if let Err(e) = monitor.init() {
        defmt::error!("Button init failed: {}", e);
        halt();
    }

    // Subscribe before edges can arrive so the first press is not missed
    let subscription = match BUTTON_EVENTS.subscribe() {
        Ok(sub) => sub,
        Err(e) => {
            defmt::error!("Button event subscription failed: {}", e);
            halt();
        }
    };
    spawner
        .spawn(event_logger(subscription))
        .expect("Failed to spawn event logger task");

    if let Err(e) = monitor.enable_interrupts() {
        defmt::error!("Button interrupt setup failed: {}", e);
        halt();
    }

    spawner
        .spawn(button_task(monitor))
        .expect("Failed to spawn button task");
}

/// Button Edge Task
///
/// Hands every EXTI edge of the button line to the monitor's edge handler.
#[embassy_executor::task]
async fn button_task(mut monitor: ButtonMonitor<'static, BlueButton>) -> ! {
    monitor.run().await
}

/// Button Event Logger Task
///
/// Waits on the event channel with a 1 s timeout and logs whatever arrives.
#[embassy_executor::task]
async fn event_logger(mut events: Subscription<'static>) {
    loop {
        match events.wait(Duration::from_secs(1)).await {
            Ok(event) => defmt::info!("Button event: {}", event),
            Err(_) => defmt::debug!("No button event in the last second"),
        }
    }
}

/// Park the core after a fatal boot error.
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
