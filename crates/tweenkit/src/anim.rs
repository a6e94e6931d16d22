//! Closed sum of the two phase-driven entity kinds.

use std::any::Any;

use crate::error::TweenError;
use crate::phase::{self, Direction, PhaseBody, Snap, State, Timing};
use crate::timeline::Timeline;
use crate::tween::Tween;

/// A tween or a timeline, addressed uniformly by engines and parent
/// timelines.
#[derive(Debug)]
pub enum Anim {
    Tween(Tween),
    Timeline(Timeline),
}

impl From<Tween> for Anim {
    fn from(tween: Tween) -> Self {
        Anim::Tween(tween)
    }
}

impl From<Timeline> for Anim {
    fn from(timeline: Timeline) -> Self {
        Anim::Timeline(timeline)
    }
}

impl Anim {
    /// Advance by `delta` seconds and return the unconsumed remainder
    /// past a terminal boundary (0 when fully absorbed).
    pub fn advance(&mut self, delta: f32) -> f32 {
        phase::advance(self, delta)
    }

    pub fn seek(&mut self, progress: f32) -> Result<(), TweenError> {
        phase::seek(self, progress)
    }

    pub fn reset(&mut self) {
        match self {
            Anim::Tween(tween) => tween.reset(),
            Anim::Timeline(timeline) => timeline.reset(),
        }
    }

    pub fn pause(&mut self) {
        match self {
            Anim::Tween(tween) => tween.pause(),
            Anim::Timeline(timeline) => timeline.pause(),
        }
    }

    pub fn resume(&mut self) {
        match self {
            Anim::Tween(tween) => tween.resume(),
            Anim::Timeline(timeline) => timeline.resume(),
        }
    }

    pub fn cancel(&mut self) {
        match self {
            Anim::Tween(tween) => tween.cancel(),
            Anim::Timeline(timeline) => timeline.cancel(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.timing().is_finished()
    }

    pub fn state(&self) -> State {
        self.timing().state
    }

    pub fn direction(&self) -> Direction {
        self.timing().direction
    }

    pub fn current_time(&self) -> f32 {
        self.timing().current_time
    }

    pub fn duration(&self) -> f32 {
        self.timing().duration()
    }

    pub fn full_duration(&self) -> f32 {
        self.timing().full_duration()
    }

    pub fn user_data_ref(&self) -> Option<&dyn Any> {
        self.timing().user_data.as_deref()
    }

    pub fn as_tween(&self) -> Option<&Tween> {
        match self {
            Anim::Tween(tween) => Some(tween),
            Anim::Timeline(_) => None,
        }
    }

    pub fn as_timeline(&self) -> Option<&Timeline> {
        match self {
            Anim::Timeline(timeline) => Some(timeline),
            Anim::Tween(_) => None,
        }
    }

    pub(crate) fn bind(
        &mut self,
        registry: &crate::access::AccessorRegistry,
        config: &crate::config::Config,
    ) -> Result<(), TweenError> {
        match self {
            Anim::Tween(tween) => tween.bind(registry, config),
            Anim::Timeline(timeline) => timeline.bind(registry, config),
        }
    }
}

impl PhaseBody for Anim {
    fn timing(&self) -> &Timing {
        match self {
            Anim::Tween(tween) => tween.timing(),
            Anim::Timeline(timeline) => timeline.timing(),
        }
    }

    fn timing_mut(&mut self) -> &mut Timing {
        match self {
            Anim::Tween(tween) => tween.timing_mut(),
            Anim::Timeline(timeline) => timeline.timing_mut(),
        }
    }

    fn initialize_values(&mut self) {
        match self {
            Anim::Tween(tween) => tween.initialize_values(),
            Anim::Timeline(timeline) => timeline.initialize_values(),
        }
    }

    fn update_body(&mut self, direction: Direction, delta: f32) {
        match self {
            Anim::Tween(tween) => tween.update_body(direction, delta),
            Anim::Timeline(timeline) => timeline.update_body(direction, delta),
        }
    }

    fn set_values(&mut self, direction: Direction, snap: Snap) {
        match self {
            Anim::Tween(tween) => tween.set_values(direction, snap),
            Anim::Timeline(timeline) => timeline.set_values(direction, snap),
        }
    }

    fn adjust_for_restart(&mut self, direction: Direction) {
        match self {
            Anim::Tween(tween) => tween.adjust_for_restart(direction),
            Anim::Timeline(timeline) => timeline.adjust_for_restart(direction),
        }
    }
}
