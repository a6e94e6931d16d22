//! Engine: owns the accessor registry, the entity arena, and the
//! per-tick drive loop.
//!
//! Entities live in a slotmap and are addressed by generational
//! [`AnimKey`] handles, so a freed slot can be recycled without any
//! risk of a stale handle reaching the new occupant. A separate
//! insertion-order list drives updates, which keeps the shared-target
//! tie-break deterministic: later-registered entities write later.

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

use crate::access::{AccessorRegistry, AttributeAccessor, Target};
use crate::anim::Anim;
use crate::config::Config;
use crate::error::TweenError;
use crate::sync::SyncBarrier;
use crate::tween::Tween;

new_key_type! {
    /// Generational handle to an entity owned by a [`TweenEngine`].
    pub struct AnimKey;
}

pub struct TweenEngine {
    config: Config,
    registry: AccessorRegistry,
    anims: SlotMap<AnimKey, Anim>,
    /// Registration order; `update` walks this, not the slotmap.
    order: Vec<AnimKey>,
    barrier: SyncBarrier,
}

impl TweenEngine {
    pub fn new(config: Config) -> Self {
        let barrier = SyncBarrier::new(!config.unsafe_no_sync);
        Self {
            config,
            registry: AccessorRegistry::new(),
            anims: SlotMap::with_key(),
            order: Vec::new(),
            barrier,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn barrier(&self) -> &SyncBarrier {
        &self.barrier
    }

    /// Register the accessor used for targets of concrete type `T`.
    pub fn register_accessor<T: 'static>(&mut self, accessor: impl AttributeAccessor + 'static) {
        self.registry.register::<T>(accessor);
        self.barrier.publish();
    }

    /// Start building a tween with this engine's limits.
    pub fn tween_to(&self, target: Target, attr: u32, duration: f32) -> Result<Tween, TweenError> {
        Tween::to(&self.config, target, attr, duration)
    }

    pub fn tween_from(
        &self,
        target: Target,
        attr: u32,
        duration: f32,
    ) -> Result<Tween, TweenError> {
        Tween::from(&self.config, target, attr, duration)
    }

    /// Take ownership of an entity and start driving it on the next
    /// `update`. Resolves every tween's accessor from the registry and
    /// re-checks value limits against this engine's config; either
    /// failing rejects the whole entity.
    pub fn add(&mut self, anim: impl Into<Anim>) -> Result<AnimKey, TweenError> {
        let mut anim = anim.into();
        anim.bind(&self.registry, &self.config)?;
        let key = self.anims.insert(anim);
        self.order.push(key);
        debug!("added entity {key:?} ({} live)", self.anims.len());
        self.barrier.publish();
        Ok(key)
    }

    pub fn get(&self, key: AnimKey) -> Option<&Anim> {
        self.anims.get(key)
    }

    pub fn get_mut(&mut self, key: AnimKey) -> Option<&mut Anim> {
        self.anims.get_mut(key)
    }

    /// Cancel one entity; it reports finished from now on and is
    /// removed by the next auto-remove pass. Returns false for a stale
    /// key.
    pub fn cancel(&mut self, key: AnimKey) -> bool {
        match self.anims.get_mut(key) {
            Some(anim) => {
                anim.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for anim in self.anims.values_mut() {
            anim.cancel();
        }
    }

    /// Drop an entity immediately, recycling its slot. The whole
    /// entity is dropped, so no buffers or callbacks survive into the
    /// slot's next occupant.
    pub fn free(&mut self, key: AnimKey) -> bool {
        if self.anims.remove(key).is_some() {
            self.order.retain(|k| *k != key);
            debug!("freed entity {key:?} ({} live)", self.anims.len());
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.anims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anims.is_empty()
    }

    /// Advance every live entity by `delta` seconds, in registration
    /// order, then sweep finished entities when `Config::auto_remove`.
    pub fn update(&mut self, delta: f32) {
        self.barrier.acquire();
        let mut finished = 0usize;
        for &key in &self.order {
            if let Some(anim) = self.anims.get_mut(key) {
                anim.advance(delta);
                if anim.is_finished() {
                    finished += 1;
                }
            }
        }
        trace!(
            "tick delta={delta} live={} finished={finished}",
            self.order.len()
        );
        if self.config.auto_remove && finished > 0 {
            let anims = &mut self.anims;
            self.order.retain(|&key| {
                let done = anims.get(key).map_or(true, |anim| anim.is_finished());
                if done {
                    anims.remove(key);
                }
                !done
            });
        }
        self.barrier.publish();
    }
}

impl Default for TweenEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Debug for TweenEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenEngine")
            .field("live", &self.anims.len())
            .field("accessors", &self.registry.len())
            .finish()
    }
}
