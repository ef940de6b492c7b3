//! Per-grid scroll event channel.
//!
//! One [`ScrollChannel`] is created per grid instance and handed by reference
//! to each pane, never a global singleton, so multiple grids in one process
//! cannot cross-talk and tests can observe delivery directly. Events are
//! delivered to subscribers in subscription order, and a subscriber always
//! finishes before the next one runs (single-threaded, run-to-completion).

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::ScrollEvent;

/// Minimum spacing between throttled wheel publications (ms). High-frequency
/// wheel devices can emit hundreds of events per second; events inside the
/// window are dropped, the next one outside it goes through.
pub const WHEEL_THROTTLE_MS: f64 = 70.0;

type Handler = Rc<dyn Fn(&ScrollEvent)>;

struct ChannelInner {
    subscribers: Vec<(u64, Handler)>,
    next_subscription: u64,
    last_throttled_publish_ms: Option<f64>,
}

/// Publish/subscribe channel for one grid's [`ScrollEvent`]s.
///
/// Cloning shares the underlying channel.
#[derive(Clone)]
pub struct ScrollChannel {
    inner: Rc<RefCell<ChannelInner>>,
}

impl Default for ScrollChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollChannel {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ChannelInner {
                subscribers: Vec::new(),
                next_subscription: 1,
                last_throttled_publish_ms: None,
            })),
        }
    }

    /// Subscribe a handler; returns the id to pass to [`unsubscribe`].
    ///
    /// [`unsubscribe`]: ScrollChannel::unsubscribe
    pub fn subscribe(&self, handler: impl Fn(&ScrollEvent) + 'static) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscription;
        inner.next_subscription += 1;
        inner.subscribers.push((id, Rc::new(handler)));
        id
    }

    pub fn unsubscribe(&self, id: u64) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(sub_id, _)| *sub_id != id);
    }

    /// Deliver `event` to every subscriber in subscription order.
    ///
    /// The subscriber list is snapshotted before dispatch, so handlers may
    /// subscribe or unsubscribe without aliasing a live borrow.
    pub fn publish(&self, event: &ScrollEvent) {
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    /// Publish with a leading-edge throttle against `now_ms`. Returns whether
    /// the event was delivered or dropped inside the throttle window.
    pub fn publish_throttled(&self, event: &ScrollEvent, now_ms: f64) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(last) = inner.last_throttled_publish_ms {
                if now_ms - last < WHEEL_THROTTLE_MS {
                    return false;
                }
            }
            inner.last_throttled_publish_ms = Some(now_ms);
        }
        self.publish(event);
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}
