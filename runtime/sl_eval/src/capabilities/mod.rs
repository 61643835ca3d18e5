//! Registry of host capabilities scripts may construct by name.
//!
//! A capability type is registered once; `construct` then builds fresh
//! instances from a single configuration value. Registering a second type
//! under the same name replaces the first.

mod file;

use std::rc::Rc;

use rustc_hash::FxHashMap;
use sl_value::{undefined_capability, Capability, EvalError, ObjectRef, Value};

pub use file::FileObject;

/// Builds a capability instance from its configuration value.
pub type ConstructorFn = fn(&Value) -> Result<ObjectRef, EvalError>;

/// Maps capability names to constructors.
pub struct CapabilityRegistry {
    constructors: FxHashMap<&'static str, ConstructorFn>,
}

impl CapabilityRegistry {
    /// Create a registry with every built-in capability registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<FileObject>();
        registry
    }

    /// Create a registry with nothing registered.
    pub fn empty() -> Self {
        CapabilityRegistry {
            constructors: FxHashMap::default(),
        }
    }

    /// Register `T` under `T::TYPE_NAME`.
    pub fn register<T: Capability>(&mut self) {
        self.constructors
            .insert(T::TYPE_NAME, construct_object::<T>);
    }

    #[must_use]
    pub fn with<T: Capability>(mut self) -> Self {
        self.register::<T>();
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.constructors.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Construct a new instance of the capability called `name`.
    pub fn construct(&self, name: &str, arg: &Value) -> Result<ObjectRef, EvalError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| undefined_capability(name))?;
        constructor(arg)
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn construct_object<T: Capability>(arg: &Value) -> Result<ObjectRef, EvalError> {
    let object: ObjectRef = Rc::new(T::construct(arg)?);
    Ok(object)
}
