//! Lifecycle events and callback subscriptions.
//!
//! Eight discrete event kinds (four per travel direction), each with
//! an independent bit in [`EventMask`]. A subscription registers for
//! any combination via the mask and fires synchronously, in
//! registration order, from inside `advance`. Callbacks receive only
//! the event kind, so they cannot mutate the firing entity's
//! subscription list mid-iteration.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// One lifecycle event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// First delay-to-running transition (forward).
    Begin,
    /// Start of a forward iteration.
    Start,
    /// End of a forward iteration.
    End,
    /// Forward completion (terminal, or an auto-reverse flip).
    Complete,
    BackBegin,
    BackStart,
    BackEnd,
    BackComplete,
}

impl EventKind {
    #[inline]
    pub fn mask(self) -> EventMask {
        match self {
            EventKind::Begin => EventMask::BEGIN,
            EventKind::Start => EventMask::START,
            EventKind::End => EventMask::END,
            EventKind::Complete => EventMask::COMPLETE,
            EventKind::BackBegin => EventMask::BACK_BEGIN,
            EventKind::BackStart => EventMask::BACK_START,
            EventKind::BackEnd => EventMask::BACK_END,
            EventKind::BackComplete => EventMask::BACK_COMPLETE,
        }
    }
}

/// Bitmask over [`EventKind`]s.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMask(pub u8);

impl EventMask {
    pub const BEGIN: EventMask = EventMask(1);
    pub const START: EventMask = EventMask(1 << 1);
    pub const END: EventMask = EventMask(1 << 2);
    pub const COMPLETE: EventMask = EventMask(1 << 3);
    pub const BACK_BEGIN: EventMask = EventMask(1 << 4);
    pub const BACK_START: EventMask = EventMask(1 << 5);
    pub const BACK_END: EventMask = EventMask(1 << 6);
    pub const BACK_COMPLETE: EventMask = EventMask(1 << 7);
    pub const ANY_FORWARD: EventMask = EventMask(0b0000_1111);
    pub const ANY_BACKWARD: EventMask = EventMask(0b1111_0000);
    pub const ANY: EventMask = EventMask(0xFF);

    #[inline]
    pub fn contains(self, kind: EventKind) -> bool {
        self.0 & kind.mask().0 != 0
    }
}

impl BitOr for EventMask {
    type Output = EventMask;
    fn bitor(self, rhs: EventMask) -> EventMask {
        EventMask(self.0 | rhs.0)
    }
}

struct Subscription {
    mask: EventMask,
    callback: Box<dyn FnMut(EventKind)>,
}

/// Ordered subscription list shared by tweens and timelines.
#[derive(Default)]
pub(crate) struct CallbackList {
    subs: Vec<Subscription>,
}

impl CallbackList {
    pub fn add(&mut self, mask: EventMask, callback: impl FnMut(EventKind) + 'static) {
        self.subs.push(Subscription {
            mask,
            callback: Box::new(callback),
        });
    }

    pub fn fire(&mut self, kind: EventKind) {
        for sub in &mut self.subs {
            if sub.mask.contains(kind) {
                (sub.callback)(kind);
            }
        }
    }
}

impl std::fmt::Debug for CallbackList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CallbackList({} subs)", self.subs.len())
    }
}
