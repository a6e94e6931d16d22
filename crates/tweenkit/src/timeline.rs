//! Composite entities: sequential and parallel timelines.
//!
//! A timeline is itself phase-driven; its `update_body` spends the
//! consumed time on its children. Sequential mode feeds one child at a
//! time, handing each child's returned overflow to the next sibling in
//! travel order. Parallel mode feeds every child the same delta and
//! banks each finished child's overflow back into that child's clock,
//! so a later reversal re-enters every child at the right spot.
//!
//! Durations are accumulated incrementally as children are pushed, so
//! configure a child's delay/repeat before pushing it.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::access::AccessorRegistry;
use crate::anim::Anim;
use crate::config::Config;
use crate::error::TweenError;
use crate::events::{EventKind, EventMask};
use crate::phase::{self, Direction, PhaseBody, Snap, State, Timing};
use crate::tween::Tween;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineMode {
    /// Children run one after another; duration is the sum.
    Sequential,
    /// Children run simultaneously; duration is the max.
    Parallel,
}

pub struct Timeline {
    timing: Timing,
    mode: TimelineMode,
    children: Vec<Anim>,
    /// Live child index, sequential mode only. May sit one step past
    /// either end after a full traversal.
    cursor: isize,
    /// Innermost unclosed group, if a begin_* call is pending its
    /// end_group.
    open: Option<Box<Timeline>>,
}

impl Timeline {
    fn with_mode(mode: TimelineMode) -> Self {
        Self {
            timing: Timing::new(0.0),
            mode,
            children: Vec::new(),
            cursor: 0,
            open: None,
        }
    }

    pub fn sequential() -> Self {
        Self::with_mode(TimelineMode::Sequential)
    }

    pub fn parallel() -> Self {
        Self::with_mode(TimelineMode::Parallel)
    }

    pub fn mode(&self) -> TimelineMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child. Routed into the innermost open group when one
    /// exists. Infinitely repeating children are rejected: the parent
    /// needs a finite duration to schedule siblings.
    pub fn push(mut self, child: impl Into<Anim>) -> Result<Self, TweenError> {
        let child = child.into();
        if child.timing().repeat_count < 0 {
            return Err(TweenError::InfiniteChild);
        }
        match &mut self.open {
            Some(group) => group.push_closed(child)?,
            None => self.push_closed(child)?,
        }
        Ok(self)
    }

    /// Append a targetless gap of `seconds`.
    pub fn push_pause(self, seconds: f32) -> Result<Self, TweenError> {
        let pause = Tween::interval(seconds)?;
        self.push(pause)
    }

    pub fn begin_sequential(self) -> Self {
        self.begin(TimelineMode::Sequential)
    }

    pub fn begin_parallel(self) -> Self {
        self.begin(TimelineMode::Parallel)
    }

    fn begin(mut self, mode: TimelineMode) -> Self {
        match &mut self.open {
            Some(group) => group.begin_in_place(mode),
            None => self.open = Some(Box::new(Timeline::with_mode(mode))),
        }
        self
    }

    fn begin_in_place(&mut self, mode: TimelineMode) {
        match &mut self.open {
            Some(group) => group.begin_in_place(mode),
            None => self.open = Some(Box::new(Timeline::with_mode(mode))),
        }
    }

    /// Close the innermost open group, folding it in as a child.
    pub fn end_group(mut self) -> Result<Self, TweenError> {
        self.end_group_in_place()?;
        Ok(self)
    }

    fn end_group_in_place(&mut self) -> Result<(), TweenError> {
        let group = match &mut self.open {
            None => return Err(TweenError::GroupMismatch),
            Some(group) if group.open.is_some() => return group.end_group_in_place(),
            Some(_) => self.open.take(),
        };
        if let Some(group) = group {
            self.push_closed(Anim::Timeline(*group))?;
        }
        Ok(())
    }

    fn push_closed(&mut self, child: Anim) -> Result<(), TweenError> {
        if child.timing().repeat_count < 0 {
            return Err(TweenError::InfiniteChild);
        }
        let child_span = child.full_duration();
        match self.mode {
            TimelineMode::Sequential => self.timing.duration += child_span,
            TimelineMode::Parallel => {
                self.timing.duration = self.timing.duration.max(child_span)
            }
        }
        self.children.push(child);
        Ok(())
    }

    pub fn delay(mut self, seconds: f32) -> Result<Self, TweenError> {
        self.timing.set_delay(seconds)?;
        Ok(self)
    }

    pub fn repeat(mut self, count: i32, delay: f32) -> Result<Self, TweenError> {
        self.timing.set_repeat(count, delay, false)?;
        Ok(self)
    }

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

    pub fn advance(&mut self, delta: f32) -> f32 {
        phase::advance(self, delta)
    }

    pub fn seek(&mut self, progress: f32) -> Result<(), TweenError> {
        phase::seek(self, progress)
    }

    /// Pristine restart, recursively.
    pub fn reset(&mut self) {
        self.timing.reset();
        self.cursor = 0;
        for child in &mut self.children {
            child.reset();
        }
    }

    pub fn pause(&mut self) {
        self.timing.is_paused = true;
        for child in &mut self.children {
            child.pause();
        }
    }

    pub fn resume(&mut self) {
        self.timing.is_paused = false;
        for child in &mut self.children {
            child.resume();
        }
    }

    pub fn cancel(&mut self) {
        self.timing.is_canceled = true;
        for child in &mut self.children {
            child.cancel();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.timing.is_finished()
    }

    pub fn state(&self) -> State {
        self.timing.state
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

    pub fn children(&self) -> &[Anim] {
        &self.children
    }

    pub(crate) fn bind(
        &mut self,
        registry: &AccessorRegistry,
        config: &Config,
    ) -> Result<(), TweenError> {
        if self.open.is_some() {
            return Err(TweenError::GroupMismatch);
        }
        for child in &mut self.children {
            child.bind(registry, config)?;
        }
        Ok(())
    }
}

/// Reposition a child for a new parent iteration: back to START,
/// parked one start-delay outside the end it will be entered from,
/// repeat budget restored.
fn reposition(child: &mut Anim, direction: Direction) {
    let t = child.timing_mut();
    t.state = State::Start;
    t.repeat_remaining = t.repeat_count;
    t.is_in_auto_reverse = false;
    t.current_time = match direction {
        Direction::Forward => -t.start_delay,
        Direction::Reverse => t.duration() + t.start_delay,
    };
    child.adjust_for_restart(direction);
}

impl PhaseBody for Timeline {
    fn timing(&self) -> &Timing {
        &self.timing
    }

    fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }

    fn initialize_values(&mut self) {
        // Children capture their own start values at their own BEGIN.
    }

    fn update_body(&mut self, direction: Direction, delta: f32) {
        match self.mode {
            TimelineMode::Parallel => {
                match direction {
                    Direction::Forward => {
                        for child in self.children.iter_mut() {
                            drive_parallel(child, delta);
                        }
                    }
                    Direction::Reverse => {
                        for child in self.children.iter_mut().rev() {
                            drive_parallel(child, delta);
                        }
                    }
                }
            }
            TimelineMode::Sequential => {
                let count = self.children.len() as isize;
                if count == 0 {
                    return;
                }
                let step: isize = match direction {
                    Direction::Forward => 1,
                    Direction::Reverse => -1,
                };
                // A previous traversal may have run the cursor off the
                // far end; pull it back onto the entry child.
                if direction == Direction::Forward && self.cursor < 0 {
                    self.cursor = 0;
                }
                if direction == Direction::Reverse && self.cursor >= count {
                    self.cursor = count - 1;
                }
                let mut rem = delta;
                while rem != 0.0 && (0..count).contains(&self.cursor) {
                    let child = &mut self.children[self.cursor as usize];
                    rem = phase::advance(child, rem);
                    if child.is_finished() {
                        self.cursor += step;
                    } else {
                        break;
                    }
                }
            }
        }
    }

    fn set_values(&mut self, direction: Direction, snap: Snap) {
        if self.timing.is_canceled {
            return;
        }
        match direction {
            Direction::Forward => {
                for child in self.children.iter_mut() {
                    child.set_values(direction, snap);
                }
            }
            Direction::Reverse => {
                for child in self.children.iter_mut().rev() {
                    child.set_values(direction, snap);
                }
            }
        }
    }

    fn adjust_for_restart(&mut self, direction: Direction) {
        self.cursor = match direction {
            Direction::Forward => 0,
            Direction::Reverse => self.children.len() as isize - 1,
        };
        for child in &mut self.children {
            reposition(child, direction);
        }
    }
}

fn drive_parallel(child: &mut Anim, delta: f32) {
    let rem = phase::advance(child, delta);
    // Bank terminal overflow into the child's own clock so a later
    // reversal re-enters it at the right local time.
    if rem != 0.0 && child.timing().is_finished() {
        child.timing_mut().current_time += rem;
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("mode", &self.mode)
            .field("children", &self.children.len())
            .field("duration", &self.timing.duration())
            .field("state", &self.timing.state)
            .finish()
    }
}
