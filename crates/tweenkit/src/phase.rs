//! Phase engine: the shared time/state-advancement machine.
//!
//! A tween and a timeline advance through the same three phases
//! (initial delay, running, finished) under the same rules: signed
//! deltas, repeat counts, auto-reverse flipping, and overflow time
//! carried across boundaries. The algorithm lives here once, as a
//! free function over the small [`PhaseBody`] capability trait, and
//! iterates — never recurses — so a delta spanning many whole
//! iterations costs a bounded stack.
//!
//! Time is signed. A forward iteration occupies `[0, duration]`; the
//! initial delay is negative time while the phase is `Start`, and the
//! reverse-direction delay is time above `duration`.

use std::any::Any;

use crate::events::{CallbackList, EventKind, EventMask};
use crate::error::TweenError;

/// Entities shorter than this have no meaningful reverse start
/// position; finishing them in reverse snaps target values instead.
pub(crate) const DURATION_EPS: f32 = 1e-6;

/// Phase of an entity's local clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Inside a delay (initial or repeat-induced); not yet running.
    Start,
    /// Between the endpoints of the current iteration.
    Run,
    /// Past a terminal boundary (and possibly re-enterable).
    Finished,
}

/// Direction of the most recent update; flips implicitly under
/// auto-reverse.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Which value snapshot a boundary snap writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Snap {
    StartValues,
    TargetValues,
}

/// Timing fields shared by every phase-driven entity.
pub struct Timing {
    pub(crate) state: State,
    pub(crate) direction: Direction,
    pub(crate) current_time: f32,
    pub(crate) duration: f32,
    pub(crate) start_delay: f32,
    /// Original repeat count: -1 = infinite, 0 = none, n = finite.
    pub(crate) repeat_count: i32,
    pub(crate) repeat_remaining: i32,
    pub(crate) repeat_delay: f32,
    pub(crate) can_auto_reverse: bool,
    pub(crate) is_in_auto_reverse: bool,
    /// Latch: BEGIN/BACK_BEGIN fires once per delay-to-running
    /// transition; reset when the entity terminally finishes.
    pub(crate) can_trigger_begin: bool,
    pub(crate) is_initialized: bool,
    pub(crate) is_paused: bool,
    pub(crate) is_canceled: bool,
    pub(crate) callbacks: CallbackList,
    pub(crate) user_data: Option<Box<dyn Any>>,
}

impl Timing {
    /// `duration` must already be validated non-negative by the caller.
    pub(crate) fn new(duration: f32) -> Self {
        Self {
            state: State::Start,
            direction: Direction::Forward,
            current_time: 0.0,
            duration,
            start_delay: 0.0,
            repeat_count: 0,
            repeat_remaining: 0,
            repeat_delay: 0.0,
            can_auto_reverse: false,
            is_in_auto_reverse: false,
            can_trigger_begin: true,
            is_initialized: false,
            is_paused: false,
            is_canceled: false,
            callbacks: CallbackList::default(),
            user_data: None,
        }
    }

    /// Return to the pristine START state regardless of history.
    /// Captured start values stay captured; they are never re-read.
    pub(crate) fn reset(&mut self) {
        self.state = State::Start;
        self.direction = Direction::Forward;
        self.current_time = -self.start_delay;
        self.repeat_remaining = self.repeat_count;
        self.can_trigger_begin = true;
        self.is_in_auto_reverse = false;
        self.is_paused = false;
        self.is_canceled = false;
    }

    pub(crate) fn set_repeat(
        &mut self,
        count: i32,
        delay: f32,
        auto_reverse: bool,
    ) -> Result<(), TweenError> {
        if count < -1 {
            return Err(TweenError::InvalidRepeatCount(count));
        }
        if !(delay >= 0.0) {
            return Err(TweenError::NegativeDelay(delay));
        }
        self.repeat_count = count;
        self.repeat_remaining = count;
        self.repeat_delay = delay;
        self.can_auto_reverse = auto_reverse;
        Ok(())
    }

    pub(crate) fn set_delay(&mut self, delay: f32) -> Result<(), TweenError> {
        if !(delay >= 0.0) {
            return Err(TweenError::NegativeDelay(delay));
        }
        self.start_delay = delay;
        if self.state == State::Start {
            self.current_time = -delay;
        }
        Ok(())
    }

    /// Length of one iteration.
    pub(crate) fn duration(&self) -> f32 {
        self.duration
    }

    /// Delay plus every iteration and repeat pause; infinite repeats
    /// yield `f32::INFINITY`.
    pub(crate) fn full_duration(&self) -> f32 {
        if self.repeat_count < 0 {
            return f32::INFINITY;
        }
        self.start_delay + self.duration + (self.repeat_delay + self.duration) * self.repeat_count as f32
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.is_canceled || self.state == State::Finished
    }

    pub(crate) fn fire(&mut self, kind: EventKind) {
        self.callbacks.fire(kind);
    }

    pub(crate) fn add_callback(
        &mut self,
        mask: EventMask,
        callback: impl FnMut(EventKind) + 'static,
    ) {
        self.callbacks.add(mask, callback);
    }
}

/// Capability interface the phase algorithm is parameterized over.
/// Implemented by `Tween`, `Timeline`, and the `Anim` sum type.
pub(crate) trait PhaseBody {
    fn timing(&self) -> &Timing;
    fn timing_mut(&mut self) -> &mut Timing;
    /// Capture start values; called exactly once ever, at first BEGIN.
    fn initialize_values(&mut self);
    /// Apply the clock: a tween writes eased values, a timeline drives
    /// its children with `delta`.
    fn update_body(&mut self, direction: Direction, delta: f32);
    /// Force the start-or-target snapshot without animating. For a
    /// timeline, `direction` orders the child delegation; a tween
    /// ignores it.
    fn set_values(&mut self, direction: Direction, snap: Snap);
    /// Kind-specific repeat repositioning (a timeline restarts its
    /// children and cursor; a tween has nothing to do).
    fn adjust_for_restart(&mut self, direction: Direction);
}

/// Advance `body` by `delta` seconds (sign-significant) and return the
/// unconsumed remainder past a terminal boundary, in the caller's
/// wall-clock sign. Returns 0 when the delta was fully absorbed.
pub(crate) fn advance<B: PhaseBody + ?Sized>(body: &mut B, delta: f32) -> f32 {
    if body.timing().is_paused || body.timing().is_canceled {
        return delta;
    }

    let mut delta = delta;
    // `sign` converts internal deltas back to caller units; it flips
    // with the entry negation and with every internal reverse flip.
    let mut sign = 1.0f32;
    if body.timing().is_in_auto_reverse {
        delta = -delta;
        sign = -sign;
    }

    // The sign bit, not a comparison: -0.0 must count as reverse.
    let mut direction = if delta.is_sign_positive() {
        Direction::Forward
    } else {
        Direction::Reverse
    };
    body.timing_mut().direction = direction;

    loop {
        let (state, duration, current_time) = {
            let t = body.timing();
            (t.state, t.duration, t.current_time)
        };
        let new_time = current_time + delta;

        match (direction, state) {
            (Direction::Forward, State::Start) => {
                if new_time <= 0.0 {
                    // Still inside the delay.
                    body.timing_mut().current_time = new_time;
                    return 0.0;
                }
                body.timing_mut().current_time = 0.0;
                if body.timing().can_trigger_begin {
                    body.timing_mut().can_trigger_begin = false;
                    if !body.timing().is_initialized {
                        body.initialize_values();
                        body.timing_mut().is_initialized = true;
                    }
                    body.timing_mut().fire(EventKind::Begin);
                }
                body.timing_mut().fire(EventKind::Start);
                body.timing_mut().state = State::Run;
                // Inverted direction argument: the start snap iterates
                // shared-target siblings so the first-registered wins.
                body.set_values(Direction::Reverse, Snap::StartValues);
                delta = new_time;
            }

            (Direction::Forward, State::Run) => {
                if new_time < duration {
                    body.timing_mut().current_time = new_time;
                    body.update_body(direction, delta);
                    return 0.0;
                }
                // Crossed the forward end.
                let consumed = duration - current_time;
                let overflow = new_time - duration;
                body.timing_mut().current_time = duration;
                body.timing_mut().state = State::Finished;
                body.update_body(direction, consumed);

                if body.timing().repeat_remaining == 0 {
                    // Terminal: exact snap wins over the eased write.
                    body.set_values(Direction::Forward, Snap::TargetValues);
                    body.timing_mut().fire(EventKind::End);
                    body.timing_mut().fire(EventKind::Complete);
                    let t = body.timing_mut();
                    t.can_trigger_begin = true;
                    t.is_in_auto_reverse = false;
                    t.repeat_remaining = t.repeat_count;
                    return overflow * sign;
                }

                if body.timing().repeat_remaining > 0 {
                    body.timing_mut().repeat_remaining -= 1;
                }
                body.timing_mut().fire(EventKind::End);
                if body.timing().can_auto_reverse {
                    body.timing_mut().fire(EventKind::Complete);
                    let t = body.timing_mut();
                    t.is_in_auto_reverse = !t.is_in_auto_reverse;
                    restart(body, Direction::Reverse);
                    direction = Direction::Reverse;
                    body.timing_mut().direction = direction;
                    delta = -overflow;
                    sign = -sign;
                } else {
                    restart(body, Direction::Forward);
                    delta = overflow;
                }
            }

            (Direction::Forward, State::Finished) => {
                if new_time <= 0.0 || new_time > duration {
                    // Overflow bookkeeping; a later reversal may still
                    // land inside the running window.
                    body.timing_mut().current_time = new_time;
                    return 0.0;
                }
                // Time flowed back into [0, D]: wake up and replay.
                body.timing_mut().state = State::Start;
            }

            (Direction::Reverse, State::Start) => {
                if new_time >= duration {
                    body.timing_mut().current_time = new_time;
                    return 0.0;
                }
                body.timing_mut().current_time = duration;
                if body.timing().can_trigger_begin {
                    body.timing_mut().can_trigger_begin = false;
                    if !body.timing().is_initialized {
                        body.initialize_values();
                        body.timing_mut().is_initialized = true;
                    }
                    body.timing_mut().fire(EventKind::BackBegin);
                }
                body.timing_mut().fire(EventKind::BackStart);
                body.timing_mut().state = State::Run;
                body.set_values(Direction::Forward, Snap::TargetValues);
                delta = new_time - duration;
            }

            (Direction::Reverse, State::Run) => {
                if new_time > 0.0 {
                    body.timing_mut().current_time = new_time;
                    body.update_body(direction, delta);
                    return 0.0;
                }
                // Crossed the start moving backward.
                let consumed = -current_time;
                let overflow = new_time;
                body.timing_mut().current_time = 0.0;
                body.timing_mut().state = State::Finished;
                body.update_body(direction, consumed);

                if body.timing().repeat_remaining == 0 {
                    // An instant entity has no reverse start position.
                    // Start snaps iterate siblings reversed, target
                    // snaps forward (the shared-target tie-break).
                    let (order, snap) = if duration <= DURATION_EPS {
                        (Direction::Forward, Snap::TargetValues)
                    } else {
                        (Direction::Reverse, Snap::StartValues)
                    };
                    body.set_values(order, snap);
                    body.timing_mut().fire(EventKind::BackEnd);
                    body.timing_mut().fire(EventKind::BackComplete);
                    let t = body.timing_mut();
                    t.can_trigger_begin = true;
                    t.is_in_auto_reverse = false;
                    t.repeat_remaining = t.repeat_count;
                    return overflow * sign;
                }

                if body.timing().repeat_remaining > 0 {
                    body.timing_mut().repeat_remaining -= 1;
                }
                body.timing_mut().fire(EventKind::BackEnd);
                if body.timing().can_auto_reverse {
                    body.timing_mut().fire(EventKind::BackComplete);
                    let t = body.timing_mut();
                    t.is_in_auto_reverse = !t.is_in_auto_reverse;
                    restart(body, Direction::Forward);
                    direction = Direction::Forward;
                    body.timing_mut().direction = direction;
                    delta = -overflow;
                    sign = -sign;
                } else {
                    restart(body, Direction::Reverse);
                    delta = overflow;
                }
            }

            (Direction::Reverse, State::Finished) => {
                if new_time < 0.0 || new_time >= duration {
                    body.timing_mut().current_time = new_time;
                    return 0.0;
                }
                body.timing_mut().state = State::Start;
            }
        }
    }
}

/// Reposition for the next repeat iteration: back to START with the
/// clock parked one repeat-delay outside the window, on the end the
/// leg will enter from.
fn restart<B: PhaseBody + ?Sized>(body: &mut B, direction: Direction) {
    let t = body.timing_mut();
    t.state = State::Start;
    t.current_time = match direction {
        Direction::Forward => -t.repeat_delay,
        Direction::Reverse => t.duration + t.repeat_delay,
    };
    body.adjust_for_restart(direction);
}

/// Jump to an absolute progress of one iteration, firing every
/// boundary crossed on the way. Rejects progress outside [0, 1].
pub(crate) fn seek<B: PhaseBody + ?Sized>(body: &mut B, progress: f32) -> Result<(), TweenError> {
    if !(0.0..=1.0).contains(&progress) {
        return Err(TweenError::ProgressOutOfRange(progress));
    }
    let delta = progress * body.timing().duration - body.timing().current_time;
    advance(body, delta);
    Ok(())
}
