//! Attribute accessor contract and registry.
//!
//! The engine never inspects target internals; it reads and writes
//! small float buffers through an [`AttributeAccessor`] implemented by
//! the host per target type. The registry maps a target's concrete
//! type to its accessor and is passed around explicitly — there is no
//! process-wide table.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::error::TweenError;

/// Shared, type-erased handle to an animatable host object.
pub type Target = Rc<RefCell<dyn Any>>;

/// Wrap a host object into a [`Target`] handle.
pub fn target<T: 'static>(value: T) -> Target {
    Rc::new(RefCell::new(value))
}

/// Read/write bridge between a target object and the engine's float
/// buffers. `attr` selects which (possibly combined) attributes the
/// tag addresses; `read` returns how many slots are meaningful.
pub trait AttributeAccessor {
    fn read(&self, target: &dyn Any, attr: u32, out: &mut [f32]) -> usize;
    fn write(&self, target: &mut dyn Any, attr: u32, values: &[f32]);
}

/// Accessors keyed by target type.
#[derive(Default)]
pub struct AccessorRegistry {
    map: HashMap<TypeId, Rc<dyn AttributeAccessor>>,
}

impl AccessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `accessor` for targets of concrete type `T`,
    /// replacing any previous registration.
    pub fn register<T: 'static>(&mut self, accessor: impl AttributeAccessor + 'static) {
        self.map.insert(TypeId::of::<T>(), Rc::new(accessor));
    }

    /// Resolve the accessor for a live target. A missing accessor is a
    /// hard failure; continuing would produce an inert tween.
    pub fn resolve(&self, target: &Target) -> Result<Rc<dyn AttributeAccessor>, TweenError> {
        let id = (*target.borrow()).type_id();
        self.map
            .get(&id)
            .cloned()
            .ok_or(TweenError::MissingAccessor)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
