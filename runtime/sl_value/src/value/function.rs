//! Callable values.

use std::fmt;
use std::rc::Rc;

use crate::errors::EvalResult;

use super::Value;

/// Signature shared by host-native and script-native callables.
///
/// The evaluator wraps script functions in a closure that captures whatever
/// it needs (body, environment); this layer only sees the call boundary.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult;

/// An opaque function value with an optional debug label.
///
/// Cloning shares the underlying closure. The label never participates in
/// equality or ordering.
#[derive(Clone)]
pub struct FunctionValue {
    name: Option<String>,
    func: Rc<NativeFn>,
}

impl FunctionValue {
    /// Create an anonymous callable.
    pub fn new(func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        Self {
            name: None,
            func: Rc::new(func),
        }
    }

    /// Create a callable carrying a debug label.
    pub fn named(name: impl Into<String>, func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        Self {
            name: Some(name.into()),
            func: Rc::new(func),
        }
    }

    /// Debug label, if one was attached.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke the callable synchronously.
    #[inline]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.func)(args)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<native-fn {name}>"),
            None => write!(f, "<native-fn>"),
        }
    }
}
