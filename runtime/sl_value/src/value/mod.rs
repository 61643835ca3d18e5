//! Runtime values for the simplelisp interpreter.
//!
//! `Value` is a closed sum over seven variants. All construction should go
//! through the factory methods (`Value::int`, `Value::string`, ...) so call
//! sites read the same regardless of payload representation.
//!
//! # Narrowing
//!
//! The `as_*` accessors return the payload when the variant matches and a
//! `TypeMismatch` error naming both types otherwise. Whether that error is
//! propagated or terminates the host is decided by the embedding runtime.

mod function;

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::capability::{CapabilityObject, ObjectRef};
use crate::errors::{type_mismatch, EvalError, EvalResult};

pub use function::{FunctionValue, NativeFn};

/// Runtime value in the simplelisp interpreter.
#[derive(Clone, Default)]
pub enum Value {
    /// Absence of a value; the default state.
    #[default]
    Null,
    /// 32-bit signed integer.
    Int(i32),
    /// 32-bit IEEE floating point.
    Float(f32),
    /// Owned text. Cloning copies the text.
    Str(String),
    /// Ordered, heterogeneous sequence. Cloning copies the elements.
    List(Vec<Value>),
    /// Callable value (host-native or script-native).
    Function(FunctionValue),
    /// Shared handle to a host capability object.
    Object(ObjectRef),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: i32) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(n: f32) -> Self {
        Value::Float(n)
    }

    /// Create a text value.
    ///
    /// # Example
    ///
    /// ```text
    /// let s = Value::string("hello");
    /// let s2 = Value::string(format!("value: {}", x));
    /// ```
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create a sequence value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items)
    }

    /// Create an anonymous callable value.
    #[inline]
    pub fn function(func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        Value::Function(FunctionValue::new(func))
    }

    /// Create a callable value carrying a debug label.
    #[inline]
    pub fn named_function(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> EvalResult + 'static,
    ) -> Self {
        Value::Function(FunctionValue::named(name, func))
    }

    /// Wrap a freshly constructed capability object.
    ///
    /// The returned value is the first holder of the object; clones alias it.
    #[inline]
    pub fn object(obj: impl CapabilityObject + 'static) -> Self {
        Value::Object(Rc::new(obj))
    }
}

// Type Predicates

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Get the type name used in diagnostics.
    ///
    /// Sequences describe their elements recursively, e.g. `[ int string ]`.
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Value::List(items) => {
                let mut out = String::from("[ ");
                for item in items {
                    out.push_str(&item.type_name());
                    out.push(' ');
                }
                out.push(']');
                Cow::Owned(out)
            }
            _ => Cow::Borrowed(self.variant_name()),
        }
    }

    /// Flat variant name, without describing sequence contents.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Object(_) => "instance",
        }
    }
}

// Narrowing Accessors

impl Value {
    pub fn as_int(&self) -> Result<i32, EvalError> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(self.mismatch("int")),
        }
    }

    pub fn as_float(&self) -> Result<f32, EvalError> {
        match self {
            Value::Float(n) => Ok(*n),
            _ => Err(self.mismatch("float")),
        }
    }

    pub fn as_str(&self) -> Result<&str, EvalError> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(self.mismatch("string")),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], EvalError> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(self.mismatch("list")),
        }
    }

    pub fn as_function(&self) -> Result<&FunctionValue, EvalError> {
        match self {
            Value::Function(func) => Ok(func),
            _ => Err(self.mismatch("function")),
        }
    }

    pub fn as_object(&self) -> Result<&ObjectRef, EvalError> {
        match self {
            Value::Object(obj) => Ok(obj),
            _ => Err(self.mismatch("instance")),
        }
    }

    /// Narrow to a callable and invoke it.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        self.as_function()?.call(args)
    }

    #[cold]
    fn mismatch(&self, expected: &str) -> EvalError {
        type_mismatch(expected, &self.type_name())
    }
}

// Conversions

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n)
    }
}

/// Truth values are integers: `1` for true, `0` for false.
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Int(i32::from(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<FunctionValue> for Value {
    fn from(func: FunctionValue) -> Self {
        Value::Function(func)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(items) => write!(f, "List({items:?})"),
            Value::Function(func) => write!(f, "Function({func:?})"),
            Value::Object(obj) => write!(f, "Object({})", obj.type_name()),
        }
    }
}

/// Display text used by `print`/`write` and text concatenation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                write!(f, "[ ")?;
                for item in items {
                    write!(f, "{item} ")?;
                }
                write!(f, "]")
            }
            // Every callable renders the same; identity is not observable.
            Value::Function(_) => write!(f, "<function>"),
            Value::Object(obj) => {
                write!(f, "<instance {}@{:p}>", obj.type_name(), Rc::as_ptr(obj))
            }
        }
    }
}

#[cfg(test)]
mod tests;
