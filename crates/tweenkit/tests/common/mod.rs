#![allow(dead_code)]

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use tweenkit::{target, AttributeAccessor, Config, EventKind, EventMask, Target, Tween};

pub const ATTR_POSITION: u32 = 0;

pub struct Point {
    pub x: f32,
    pub y: f32,
}

pub struct PointAccessor;

impl AttributeAccessor for PointAccessor {
    fn read(&self, target: &dyn Any, _attr: u32, out: &mut [f32]) -> usize {
        let point = target.downcast_ref::<Point>().expect("point target");
        out[0] = point.x;
        out[1] = point.y;
        2
    }

    fn write(&self, target: &mut dyn Any, _attr: u32, values: &[f32]) {
        let point = target.downcast_mut::<Point>().expect("point target");
        point.x = values[0];
        point.y = values[1];
    }
}

pub fn point(x: f32, y: f32) -> Target {
    target(Point { x, y })
}

pub fn read_point(handle: &Target) -> (f32, f32) {
    let borrowed = handle.borrow();
    let p = borrowed.downcast_ref::<Point>().expect("point target");
    (p.x, p.y)
}

/// Standalone point tween with the accessor attached directly.
pub fn point_tween(handle: &Target, to: (f32, f32), duration: f32) -> Tween {
    Tween::to(&Config::default(), handle.clone(), ATTR_POSITION, duration)
        .expect("valid duration")
        .values(&[to.0, to.1])
        .expect("within limits")
        .accessor(Rc::new(PointAccessor))
}

/// Shared log of (entity tag, event kind) pairs in firing order.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<(&'static str, EventKind)>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback recording every event under `tag`; pass to `.on(..)`.
    pub fn hook(&self, tag: &'static str) -> impl FnMut(EventKind) + 'static {
        let events = Rc::clone(&self.events);
        move |kind| events.borrow_mut().push((tag, kind))
    }

    pub fn mask() -> EventMask {
        EventMask::ANY
    }

    pub fn all(&self) -> Vec<(&'static str, EventKind)> {
        self.events.borrow().clone()
    }

    pub fn count(&self, tag: &str, kind: EventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|(t, k)| *t == tag && *k == kind)
            .count()
    }

    /// Index of the first occurrence, in global firing order.
    pub fn position(&self, tag: &str, kind: EventKind) -> Option<usize> {
        self.events
            .borrow()
            .iter()
            .position(|(t, k)| *t == tag && *k == kind)
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
