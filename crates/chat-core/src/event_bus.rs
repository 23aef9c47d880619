//! Event feed from the session core to the presentation layer.
//!
//! Single-threaded (WASM) and clone-cheap; every layer shares one feed.
//! The page drains it after each resolved intent, so a reload that lands
//! before the drain replaces the pending `SummariesLoaded` instead of
//! queueing a second one. A page that stops draining loses the oldest
//! events once `MAX_PENDING` is reached.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chat_types::event::SessionEvent;

/// Undrained events kept before the oldest are dropped.
pub const MAX_PENDING: usize = 256;

#[derive(Default)]
struct Feed {
    pending: VecDeque<SessionEvent>,
    /// Events dropped since the last drain.
    dropped: usize,
}

#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Feed>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: SessionEvent) {
        log::trace!("event: {:?}", event);
        let mut feed = self.inner.borrow_mut();
        if matches!(event, SessionEvent::SummariesLoaded { .. }) {
            feed.pending
                .retain(|e| !matches!(e, SessionEvent::SummariesLoaded { .. }));
        }
        if feed.pending.len() >= MAX_PENDING {
            feed.pending.pop_front();
            feed.dropped += 1;
        }
        feed.pending.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<SessionEvent> {
        let mut feed = self.inner.borrow_mut();
        if feed.dropped > 0 {
            log::warn!("{} session events dropped before the feed was drained", feed.dropped);
            feed.dropped = 0;
        }
        feed.pending.drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().pending.is_empty()
    }

    /// Events dropped for lack of a drain since the last one.
    pub fn dropped(&self) -> usize {
        self.inner.borrow().dropped
    }
}
