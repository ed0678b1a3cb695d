//! Button event channel
//!
//! A bounded broadcast channel for [`ButtonEvent`]s, built on `embassy_sync`'s pub-sub
//! channel. Publishing never blocks: every subscriber shares a ring of
//! [`EVENT_QUEUE_DEPTH`] events, and when the ring is full the oldest event is evicted.
//! A subscriber that had not read the evicted event learns how many it lost the next
//! time it reads, then carries on from the oldest retained event.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pubsub::{PubSubChannel, Subscriber, WaitResult};
use embassy_time::{Duration, TimeoutError, with_timeout};

use crate::config::{EVENT_QUEUE_DEPTH, MAX_PUBLISHERS, MAX_SUBSCRIBERS};
use crate::error::ChannelError;
use crate::event::ButtonEvent;

type Inner = PubSubChannel<
    CriticalSectionRawMutex,
    ButtonEvent,
    EVENT_QUEUE_DEPTH,
    MAX_SUBSCRIBERS,
    MAX_PUBLISHERS,
>;

/// Process-wide button event channel.
/// Other program parts subscribe here to receive button events.
pub static BUTTON_EVENTS: EventChannel = EventChannel::new();

/// Ordered, multi-subscriber broadcast of button events.
pub struct EventChannel {
    inner: Inner,
}

impl EventChannel {
    pub const fn new() -> Self {
        Self {
            inner: PubSubChannel::new(),
        }
    }

    /// Deliver `event` to every live subscription, in call order.
    ///
    /// Safe to call from interrupt context: it takes a short critical section and never
    /// waits. With no subscribers the event is discarded.
    pub fn publish(&self, event: ButtonEvent) {
        self.inner.immediate_publisher().publish_immediate(event);
    }

    /// Register a new listener. Events published before this call are not visible to it.
    pub fn subscribe(&self) -> Result<Subscription<'_>, ChannelError> {
        let inner = self
            .inner
            .subscriber()
            .map_err(|_| ChannelError::SubscriberLimit)?;
        Ok(Subscription { inner, dropped: 0 })
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a registered listener. Dropping it frees the subscriber slot.
pub struct Subscription<'a> {
    inner: Subscriber<
        'a,
        CriticalSectionRawMutex,
        ButtonEvent,
        EVENT_QUEUE_DEPTH,
        MAX_SUBSCRIBERS,
        MAX_PUBLISHERS,
    >,
    dropped: u64,
}

impl Subscription<'_> {
    /// Wait for the next event, giving up after `timeout`.
    pub async fn wait(&mut self, timeout: Duration) -> Result<ButtonEvent, TimeoutError> {
        with_timeout(timeout, self.next()).await
    }

    /// Wait for the next event with no deadline.
    pub async fn next(&mut self) -> ButtonEvent {
        loop {
            match self.inner.next_message().await {
                WaitResult::Message(event) => return event,
                WaitResult::Lagged(missed) => self.record_lag(missed),
            }
        }
    }

    /// Take the next event if one is already queued.
    pub fn try_next(&mut self) -> Option<ButtonEvent> {
        loop {
            match self.inner.try_next_message()? {
                WaitResult::Message(event) => return Some(event),
                WaitResult::Lagged(missed) => self.record_lag(missed),
            }
        }
    }

    /// Events evicted before this subscription could read them.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn record_lag(&mut self, missed: u64) {
        self.dropped += missed;
        warn!("button event subscriber lagged, {} event(s) dropped", missed);
    }
}
