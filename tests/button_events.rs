//! Press/release scripts driven through an emulated button line.
//!
//! Each test runs the monitor's edge loop next to a script that toggles the line and
//! waits on the event channel, the way firmware modules consume button events.

use core::future::Future;

use button_monitor::hardware::{EmulatedFault, EmulatedLine, Level, ManualClock};
use button_monitor::{ButtonConfig, ButtonEvent, ButtonMonitor, EventChannel, Subscription};
use embassy_futures::block_on;
use embassy_futures::select::{Either, select};
use embassy_time::Duration;

/// How long a script waits for an event that should arrive.
const WAIT: Duration = Duration::from_secs(1);
/// How long a script waits to confirm that nothing else arrives.
const QUIET: Duration = Duration::from_millis(50);

type EmulatedMonitor<'a> = ButtonMonitor<'a, &'a EmulatedLine, &'a ManualClock>;

fn ready_monitor<'a>(
    line: &'a EmulatedLine,
    clock: &'a ManualClock,
    channel: &'a EventChannel,
) -> EmulatedMonitor<'a> {
    let mut monitor = ButtonMonitor::new(line, clock, channel, ButtonConfig::default());
    monitor.init().unwrap();
    monitor.enable_interrupts().unwrap();
    monitor
}

/// Run `script` to completion while the monitor services edges.
fn drive(monitor: &mut EmulatedMonitor<'_>, script: impl Future<Output = ()>) {
    block_on(async {
        match select(monitor.run(), script).await {
            Either::First(_) => unreachable!("edge loop never returns"),
            Either::Second(()) => {}
        }
    });
}

async fn next(sub: &mut Subscription<'_>, timeout: Duration) -> Option<ButtonEvent> {
    sub.wait(timeout).await.ok()
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[test]
fn single_press() {
    let line = EmulatedLine::new(Level::Inactive);
    let clock = ManualClock::new();
    let channel = EventChannel::new();
    let mut sub = channel.subscribe().unwrap();
    let mut monitor = ready_monitor(&line, &clock, &channel);

    drive(&mut monitor, async {
        line.press();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Pressed));

        clock.advance(millis(500));
        line.release();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Released));
        assert_eq!(next(&mut sub, QUIET).await, None);
    });
}

#[test]
fn long_press() {
    let line = EmulatedLine::new(Level::Inactive);
    let clock = ManualClock::new();
    let channel = EventChannel::new();
    let mut sub = channel.subscribe().unwrap();
    let mut monitor = ready_monitor(&line, &clock, &channel);

    drive(&mut monitor, async {
        line.press();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Pressed));

        clock.advance(millis(3000));
        line.release();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Released));
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::LongPress));
        assert_eq!(next(&mut sub, QUIET).await, None);
    });
}

#[test]
fn release_one_millisecond_short_of_threshold() {
    let line = EmulatedLine::new(Level::Inactive);
    let clock = ManualClock::new();
    let channel = EventChannel::new();
    let mut sub = channel.subscribe().unwrap();
    let mut monitor = ready_monitor(&line, &clock, &channel);

    drive(&mut monitor, async {
        line.press();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Pressed));

        clock.advance(millis(2999));
        line.release();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Released));
        assert_eq!(next(&mut sub, QUIET).await, None);
    });
}

#[test]
fn short_cycle_then_long_cycle() {
    let line = EmulatedLine::new(Level::Inactive);
    let clock = ManualClock::new();
    let channel = EventChannel::new();
    let mut sub = channel.subscribe().unwrap();
    let mut monitor = ready_monitor(&line, &clock, &channel);

    drive(&mut monitor, async {
        let mut seen = Vec::new();

        line.press();
        seen.extend(next(&mut sub, WAIT).await);
        clock.advance(millis(200));
        line.release();
        seen.extend(next(&mut sub, WAIT).await);

        clock.advance(millis(1000));
        line.press();
        seen.extend(next(&mut sub, WAIT).await);
        clock.advance(millis(3500));
        line.release();
        seen.extend(next(&mut sub, WAIT).await);
        seen.extend(next(&mut sub, WAIT).await);

        assert_eq!(
            seen,
            [
                ButtonEvent::Pressed,
                ButtonEvent::Released,
                ButtonEvent::Pressed,
                ButtonEvent::Released,
                ButtonEvent::LongPress,
            ]
        );
        assert_eq!(next(&mut sub, QUIET).await, None);
    });
}

#[test]
fn spurious_edges_publish_nothing() {
    let line = EmulatedLine::new(Level::Inactive);
    let clock = ManualClock::new();
    let channel = EventChannel::new();
    let mut sub = channel.subscribe().unwrap();
    let mut monitor = ready_monitor(&line, &clock, &channel);

    drive(&mut monitor, async {
        line.raise_spurious_edge();
        assert_eq!(next(&mut sub, QUIET).await, None);

        line.press();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Pressed));
        line.raise_spurious_edge();
        assert_eq!(next(&mut sub, QUIET).await, None);

        clock.advance(millis(100));
        line.release();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Released));
        line.raise_spurious_edge();
        assert_eq!(next(&mut sub, QUIET).await, None);
    });
}

#[test]
fn every_subscriber_receives_the_long_press_sequence() {
    let line = EmulatedLine::new(Level::Inactive);
    let clock = ManualClock::new();
    let channel = EventChannel::new();
    let mut first = channel.subscribe().unwrap();
    let mut second = channel.subscribe().unwrap();
    let mut monitor = ready_monitor(&line, &clock, &channel);

    drive(&mut monitor, async {
        line.press();
        assert_eq!(next(&mut first, WAIT).await, Some(ButtonEvent::Pressed));
        assert_eq!(next(&mut second, WAIT).await, Some(ButtonEvent::Pressed));

        clock.advance(millis(5000));
        line.release();
        for sub in [&mut first, &mut second] {
            assert_eq!(next(sub, WAIT).await, Some(ButtonEvent::Released));
            assert_eq!(next(sub, WAIT).await, Some(ButtonEvent::LongPress));
            assert_eq!(next(sub, QUIET).await, None);
        }
    });
}

#[test]
fn button_held_at_boot_reports_release_only() {
    let line = EmulatedLine::new(Level::Active);
    let clock = ManualClock::new();
    let channel = EventChannel::new();
    let mut sub = channel.subscribe().unwrap();
    let mut monitor = ready_monitor(&line, &clock, &channel);

    drive(&mut monitor, async {
        clock.advance(millis(5000));
        line.release();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Released));
        assert_eq!(next(&mut sub, QUIET).await, None);

        line.press();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Pressed));
    });
}

#[test]
fn edges_before_enable_interrupts_are_not_dispatched() {
    let line = EmulatedLine::new(Level::Inactive);
    let clock = ManualClock::new();
    let channel = EventChannel::new();
    let mut sub = channel.subscribe().unwrap();
    let mut monitor = ButtonMonitor::new(&line, &clock, &channel, ButtonConfig::default());
    monitor.init().unwrap();

    // Toggled while interrupts are still off: nobody hears about it.
    line.press();
    line.release();
    monitor.enable_interrupts().unwrap();

    drive(&mut monitor, async {
        assert_eq!(next(&mut sub, QUIET).await, None);

        line.press();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Pressed));
    });
}

#[test]
fn edge_loop_recovers_after_a_failed_wait() {
    let line = EmulatedLine::new(Level::Inactive);
    let clock = ManualClock::new();
    let channel = EventChannel::new();
    let mut sub = channel.subscribe().unwrap();
    let mut monitor = ready_monitor(&line, &clock, &channel);
    line.fail_edge_wait(EmulatedFault::EIO);

    drive(&mut monitor, async {
        line.press();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Pressed));

        clock.advance(millis(300));
        line.release();
        assert_eq!(next(&mut sub, WAIT).await, Some(ButtonEvent::Released));
        assert_eq!(next(&mut sub, QUIET).await, None);
    });
}

#[test]
fn idle_channel_wait_times_out() {
    let channel = EventChannel::new();
    let mut sub = channel.subscribe().unwrap();

    let started = std::time::Instant::now();
    let result = block_on(sub.wait(Duration::from_secs(1)));

    assert!(result.is_err());
    assert!(started.elapsed() >= std::time::Duration::from_secs(1));
}
