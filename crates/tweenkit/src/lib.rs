//! tweenkit: an animation interpolation engine.
//!
//! A [`Tween`] animates numeric attributes of a target object over
//! time through an easing curve; a [`Timeline`] chains or
//! parallelizes tweens and other timelines. Both share one
//! deterministic phase state machine driven by signed time deltas, so
//! arbitrarily large ticks and rewinding both resolve to exact
//! boundary semantics: lifecycle callbacks fire at the precise phase
//! edges, repeats and auto-reverse legs are crossed iteratively, and
//! time overflowing a finished entity is returned to the caller (or
//! parent timeline) for further spending.
//!
//! Hosts implement [`AttributeAccessor`] per target type and register
//! it with a [`TweenEngine`], which owns entities behind generational
//! [`AnimKey`] handles and advances them all on [`TweenEngine::update`].
//!
//! ```no_run
//! use tweenkit::{target, Config, Easing, TweenEngine};
//! # use tweenkit::AttributeAccessor;
//! # use std::any::Any;
//! # struct Sprite { x: f32 }
//! # struct SpriteAccessor;
//! # impl AttributeAccessor for SpriteAccessor {
//! #     fn read(&self, t: &dyn Any, _a: u32, out: &mut [f32]) -> usize {
//! #         out[0] = t.downcast_ref::<Sprite>().unwrap().x; 1
//! #     }
//! #     fn write(&self, t: &mut dyn Any, _a: u32, v: &[f32]) {
//! #         t.downcast_mut::<Sprite>().unwrap().x = v[0];
//! #     }
//! # }
//!
//! # fn main() -> Result<(), tweenkit::TweenError> {
//! let mut engine = TweenEngine::new(Config::default());
//! engine.register_accessor::<Sprite>(SpriteAccessor);
//!
//! let sprite = target(Sprite { x: 0.0 });
//! let tween = engine
//!     .tween_to(sprite, 0, 1.0)?
//!     .values(&[100.0])?
//!     .ease(Easing::QuadOut);
//! engine.add(tween)?;
//!
//! engine.update(1.0 / 60.0);
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod anim;
pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod events;
pub mod path;
mod phase;
pub mod sync;
pub mod timeline;
pub mod tween;

pub use access::{target, AccessorRegistry, AttributeAccessor, Target};
pub use anim::Anim;
pub use config::Config;
pub use easing::Easing;
pub use engine::{AnimKey, TweenEngine};
pub use error::TweenError;
pub use events::{EventKind, EventMask};
pub use path::TweenPath;
pub use phase::{Direction, State};
pub use sync::SyncBarrier;
pub use timeline::{Timeline, TimelineMode};
pub use tween::Tween;
