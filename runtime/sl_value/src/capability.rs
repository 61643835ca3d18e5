//! Capability objects: host-implemented objects exposed to scripts.
//!
//! A host type becomes callable from scripts by implementing [`Capability`]:
//! a single-value constructor plus a static [`MethodTable`] mapping method
//! names to functions. The blanket [`CapabilityObject`] impl turns every
//! `Capability` into an object-safe handle that `Value::Object` can hold,
//! so new capabilities never require changes to this crate.
//!
//! # Ownership
//!
//! `ObjectRef` is an `Rc`: every `Value` holding it aliases the same
//! instance, and the object (with any host resource it owns) is dropped when
//! the last holder goes away. There is no internal synchronization; objects
//! stay on the thread that created them.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::{arity_mismatch, EvalError, EvalResult};
use crate::value::Value;

/// Shared handle to a capability object.
pub type ObjectRef = Rc<dyn CapabilityObject>;

/// Method implementation: receiver plus positional arguments.
pub type MethodFn<T> = fn(&T, &[Value]) -> EvalResult;

/// Object-safe view of a capability, as seen through `Value::Object`.
pub trait CapabilityObject {
    /// Name of the concrete capability type (e.g. `file`).
    fn type_name(&self) -> &'static str;

    /// All method names, sorted.
    fn method_names(&self) -> Vec<&'static str>;

    /// Declared argument count for `name`, or `None` if there is no such method.
    fn method_arity(&self, name: &str) -> Option<usize>;

    fn has_method(&self, name: &str) -> bool {
        self.method_arity(name).is_some()
    }

    /// Invoke a method by name.
    ///
    /// Returns `None` when the method does not exist, leaving the policy for
    /// unknown methods to the caller.
    fn call_method(&self, name: &str, args: &[Value]) -> Option<EvalResult>;
}

impl fmt::Debug for dyn CapabilityObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<instance {}>", self.type_name())
    }
}

/// A concrete capability type.
pub trait Capability: Sized + 'static {
    /// Name reported by `CapabilityObject::type_name`.
    const TYPE_NAME: &'static str;

    /// Build an instance from its single configuration value.
    ///
    /// Resource acquisition happens here; failures are returned, never
    /// deferred to the first method call.
    fn construct(arg: &Value) -> Result<Self, EvalError>;

    /// The method table for this type, built once.
    fn methods() -> &'static MethodTable<Self>;
}

/// One entry in a method table.
pub struct MethodEntry<T> {
    pub name: &'static str,
    pub arity: usize,
    pub func: MethodFn<T>,
}

impl<T> MethodEntry<T> {
    /// Check the argument count, then run the method.
    pub fn invoke(&self, receiver: &T, args: &[Value]) -> EvalResult {
        if args.len() != self.arity {
            return Err(arity_mismatch(self.name, self.arity, args.len()));
        }
        (self.func)(receiver, args)
    }
}

/// Name-to-method dispatch table for a capability type.
pub struct MethodTable<T> {
    entries: FxHashMap<&'static str, MethodEntry<T>>,
}

impl<T> MethodTable<T> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Register a method. A later registration under the same name replaces
    /// the earlier one.
    #[must_use]
    pub fn with(mut self, name: &'static str, arity: usize, func: MethodFn<T>) -> Self {
        self.entries.insert(name, MethodEntry { name, arity, func });
        self
    }

    pub fn get(&self, name: &str) -> Option<&MethodEntry<T>> {
        self.entries.get(name)
    }

    /// Method names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

}

impl<T> Default for MethodTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Capability> CapabilityObject for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn method_names(&self) -> Vec<&'static str> {
        T::methods().names()
    }

    fn method_arity(&self, name: &str) -> Option<usize> {
        T::methods().get(name).map(|entry| entry.arity)
    }

    #[tracing::instrument(level = "debug", skip(self, args), fields(capability = T::TYPE_NAME))]
    fn call_method(&self, name: &str, args: &[Value]) -> Option<EvalResult> {
        let entry = T::methods().get(name)?;
        Some(entry.invoke(self, args))
    }
}
