//! Caller-error taxonomy.
//!
//! Every variant is a configuration mistake rejected at the call that
//! introduces it. Internal state-machine corruption is not represented
//! here; the phase dispatch panics on an unrecognized state instead.

use thiserror::Error;

/// Errors produced while configuring tweens, timelines, or the engine.
#[derive(Debug, Error, PartialEq)]
pub enum TweenError {
    #[error("duration must be >= 0, got {0}")]
    NegativeDuration(f32),

    #[error("delay must be >= 0, got {0}")]
    NegativeDelay(f32),

    #[error("repeat count must be >= -1 (-1 = infinite), got {0}")]
    InvalidRepeatCount(i32),

    #[error("combined attribute count {count} exceeds configured limit {limit}")]
    CombinedAttributeLimit { count: usize, limit: usize },

    #[error("waypoint count {count} exceeds configured limit {limit}")]
    WaypointLimit { count: usize, limit: usize },

    #[error("waypoint has {count} values but the tween drives {slots} attributes")]
    WaypointArityMismatch { count: usize, slots: usize },

    #[error("seek progress must be in [0, 1], got {0}")]
    ProgressOutOfRange(f32),

    #[error("an infinitely repeating child cannot be added to a timeline")]
    InfiniteChild,

    #[error("no attribute accessor registered for the target's type")]
    MissingAccessor,

    #[error("end_group called without a matching begin_sequential/begin_parallel")]
    GroupMismatch,
}
