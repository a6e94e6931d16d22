//! Single-target interpolation.
//!
//! A [`Tween`] animates one attribute tag of one target: it captures
//! the live values at its first BEGIN, then writes eased values
//! through the attribute accessor every tick. Value setters validate
//! against the configured attribute/waypoint limits at the call that
//! introduces them, never by silent truncation.

use std::any::Any;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::access::{AccessorRegistry, AttributeAccessor, Target};
use crate::config::Config;
use crate::easing::Easing;
use crate::error::TweenError;
use crate::events::{EventKind, EventMask};
use crate::path::TweenPath;
use crate::phase::{self, Direction, PhaseBody, Snap, State, Timing, DURATION_EPS};

/// Per-attribute value buffer; most tweens touch 1-4 slots.
type ValueBuf = SmallVec<[f32; 4]>;

pub struct Tween {
    timing: Timing,
    target: Option<Target>,
    accessor: Option<Rc<dyn AttributeAccessor>>,
    attr: u32,
    easing: Easing,
    path: TweenPath,
    start: ValueBuf,
    end: ValueBuf,
    /// Flattened `[waypoint][slot]`.
    waypoints: SmallVec<[f32; 8]>,
    waypoint_count: usize,
    /// How many float slots are meaningful for this attribute tag.
    slots: usize,
    is_relative: bool,
    is_from: bool,
    attrs_limit: usize,
    waypoints_limit: usize,
}

impl Tween {
    fn with_parts(
        config: &Config,
        target: Option<Target>,
        attr: u32,
        duration: f32,
        is_from: bool,
    ) -> Result<Self, TweenError> {
        if !(duration >= 0.0) {
            return Err(TweenError::NegativeDuration(duration));
        }
        Ok(Self {
            timing: Timing::new(duration),
            target,
            accessor: None,
            attr,
            easing: Easing::default(),
            path: TweenPath::default(),
            start: ValueBuf::new(),
            end: ValueBuf::new(),
            waypoints: SmallVec::new(),
            waypoint_count: 0,
            slots: 0,
            is_relative: false,
            is_from,
            attrs_limit: config.combined_attrs_limit,
            waypoints_limit: config.waypoints_limit,
        })
    }

    /// Animate `target`'s attribute toward the values given later via
    /// [`values`](Self::values).
    pub fn to(
        config: &Config,
        target: Target,
        attr: u32,
        duration: f32,
    ) -> Result<Self, TweenError> {
        Self::with_parts(config, Some(target), attr, duration, false)
    }

    /// Animate backward: the supplied values become the starting point
    /// and the captured live values the destination.
    pub fn from(
        config: &Config,
        target: Target,
        attr: u32,
        duration: f32,
    ) -> Result<Self, TweenError> {
        Self::with_parts(config, Some(target), attr, duration, true)
    }

    /// Targetless pause; timelines use it for gaps between children.
    pub fn interval(duration: f32) -> Result<Self, TweenError> {
        Self::with_parts(&Config::default(), None, 0, duration, false)
    }

    /// Set the destination values, one per combined attribute slot.
    pub fn values(mut self, values: &[f32]) -> Result<Self, TweenError> {
        if values.len() > self.attrs_limit {
            return Err(TweenError::CombinedAttributeLimit {
                count: values.len(),
                limit: self.attrs_limit,
            });
        }
        self.slots = values.len();
        self.end = SmallVec::from_slice(values);
        Ok(self)
    }

    /// Append one waypoint (same arity as the destination values).
    pub fn waypoint(mut self, values: &[f32]) -> Result<Self, TweenError> {
        if self.waypoint_count + 1 > self.waypoints_limit {
            return Err(TweenError::WaypointLimit {
                count: self.waypoint_count + 1,
                limit: self.waypoints_limit,
            });
        }
        if values.len() != self.slots {
            return Err(TweenError::WaypointArityMismatch {
                count: values.len(),
                slots: self.slots,
            });
        }
        self.waypoints.extend_from_slice(values);
        self.waypoint_count += 1;
        Ok(self)
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn path(mut self, path: TweenPath) -> Self {
        self.path = path;
        self
    }

    /// Treat destination values as offsets from the captured start.
    pub fn relative(mut self) -> Self {
        self.is_relative = true;
        self
    }

    pub fn delay(mut self, seconds: f32) -> Result<Self, TweenError> {
        self.timing.set_delay(seconds)?;
        Ok(self)
    }

    /// Repeat `count` extra iterations (-1 = forever), restarting
    /// forward after `delay` seconds each time.
    pub fn repeat(mut self, count: i32, delay: f32) -> Result<Self, TweenError> {
        self.timing.set_repeat(count, delay, false)?;
        Ok(self)
    }

    /// Repeat with yoyo semantics: every iteration plays the previous
    /// one backward.
    pub fn repeat_auto_reverse(mut self, count: i32, delay: f32) -> Result<Self, TweenError> {
        self.timing.set_repeat(count, delay, true)?;
        Ok(self)
    }

    pub fn on(mut self, mask: EventMask, callback: impl FnMut(EventKind) + 'static) -> Self {
        self.timing.add_callback(mask, callback);
        self
    }

    pub fn user_data(mut self, data: impl Any) -> Self {
        self.timing.user_data = Some(Box::new(data));
        self
    }

    /// Attach the accessor directly instead of resolving it from an
    /// engine's registry.
    pub fn accessor(mut self, accessor: Rc<dyn AttributeAccessor>) -> Self {
        self.accessor = Some(accessor);
        self
    }

    /// Advance by `delta` seconds; see the crate docs for the overflow
    /// contract.
    pub fn advance(&mut self, delta: f32) -> f32 {
        phase::advance(self, delta)
    }

    /// Jump to `progress` of one iteration, in [0, 1].
    pub fn seek(&mut self, progress: f32) -> Result<(), TweenError> {
        phase::seek(self, progress)
    }

    pub fn reset(&mut self) {
        self.timing.reset();
    }

    pub fn pause(&mut self) {
        self.timing.is_paused = true;
    }

    pub fn resume(&mut self) {
        self.timing.is_paused = false;
    }

    pub fn cancel(&mut self) {
        self.timing.is_canceled = true;
    }

    pub fn is_finished(&self) -> bool {
        self.timing.is_finished()
    }

    pub fn state(&self) -> State {
        self.timing.state
    }

    pub fn direction(&self) -> Direction {
        self.timing.direction
    }

    pub fn current_time(&self) -> f32 {
        self.timing.current_time
    }

    pub fn duration(&self) -> f32 {
        self.timing.duration()
    }

    pub fn full_duration(&self) -> f32 {
        self.timing.full_duration()
    }

    pub fn user_data_ref(&self) -> Option<&dyn Any> {
        self.timing.user_data.as_deref()
    }

    /// Engine hook: enforce the engine's limits and resolve a missing
    /// accessor from its registry.
    pub(crate) fn bind(
        &mut self,
        registry: &AccessorRegistry,
        config: &Config,
    ) -> Result<(), TweenError> {
        if self.slots > config.combined_attrs_limit {
            return Err(TweenError::CombinedAttributeLimit {
                count: self.slots,
                limit: config.combined_attrs_limit,
            });
        }
        if self.waypoint_count > config.waypoints_limit {
            return Err(TweenError::WaypointLimit {
                count: self.waypoint_count,
                limit: config.waypoints_limit,
            });
        }
        if let Some(target) = &self.target {
            if self.accessor.is_none() {
                self.accessor = Some(registry.resolve(target)?);
            }
        }
        Ok(())
    }
}

impl PhaseBody for Tween {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn initialize_values(&mut self) {
        let Some(target) = &self.target else {
            return;
        };
        let Some(accessor) = &self.accessor else {
            // A silently inert tween would be worse than a loud stop.
            panic!("tween target has no accessor; add it through a TweenEngine or attach one");
        };
        self.start.clear();
        self.start.resize(self.slots, 0.0);
        accessor.read(&*target.borrow(), self.attr, &mut self.start);
        if self.is_relative {
            for i in 0..self.slots {
                self.end[i] += self.start[i];
                for w in 0..self.waypoint_count {
                    self.waypoints[w * self.slots + i] += self.start[i];
                }
            }
        }
        if self.is_from {
            std::mem::swap(&mut self.start, &mut self.end);
        }
    }

    fn update_body(&mut self, _direction: Direction, _delta: f32) {
        if !self.timing.is_initialized || self.slots == 0 {
            return;
        }
        let (Some(target), Some(accessor)) = (&self.target, &self.accessor) else {
            return;
        };
        let duration = self.timing.duration();
        let ratio = if duration <= DURATION_EPS {
            1.0
        } else {
            self.timing.current_time / duration
        };
        let t = self.easing.apply(ratio);
        let mut out = ValueBuf::with_capacity(self.slots);
        if self.waypoint_count == 0 {
            for i in 0..self.slots {
                out.push(self.start[i] + t * (self.end[i] - self.start[i]));
            }
        } else {
            let mut points: SmallVec<[f32; 10]> = SmallVec::new();
            for i in 0..self.slots {
                points.clear();
                points.push(self.start[i]);
                for w in 0..self.waypoint_count {
                    points.push(self.waypoints[w * self.slots + i]);
                }
                points.push(self.end[i]);
                out.push(self.path.compute(t, &points));
            }
        }
        accessor.write(&mut *target.borrow_mut(), self.attr, &out);
    }

    fn set_values(&mut self, _direction: Direction, snap: Snap) {
        if !self.timing.is_initialized || self.timing.is_canceled || self.slots == 0 {
            return;
        }
        let (Some(target), Some(accessor)) = (&self.target, &self.accessor) else {
            return;
        };
        let values = match snap {
            Snap::StartValues => &self.start,
            Snap::TargetValues => &self.end,
        };
        accessor.write(&mut *target.borrow_mut(), self.attr, values);
    }

    fn adjust_for_restart(&mut self, _direction: Direction) {}
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("attr", &self.attr)
            .field("duration", &self.timing.duration())
            .field("slots", &self.slots)
            .field("state", &self.timing.state)
            .finish()
    }
}
