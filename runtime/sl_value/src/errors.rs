//! Error types for value coercion and capability dispatch.
//!
//! `EvalErrorKind` provides typed error categories so embedders can match on
//! the failure instead of parsing messages. Factory functions (e.g.
//! `type_mismatch()`) are the public constructors.

use std::fmt;

use thiserror::Error;

use crate::op::BinaryOp;
use crate::value::Value;

/// Result of an operation that produces a value.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Narrowing
    /// A value was narrowed to a variant it does not hold.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    // Operators
    /// Operand combination not covered by the coercion rules.
    #[error("operator `{op}` cannot be applied to `{left}` and `{right}`")]
    UnsupportedOperation {
        op: BinaryOp,
        left: String,
        right: String,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    // Capabilities
    /// A host resource could not be acquired or used.
    #[error("resource unavailable: {resource}: {reason}")]
    ResourceUnavailable { resource: String, reason: String },
    #[error("no method '{method}' on type {type_name}")]
    UndefinedMethod { method: String, type_name: String },
    #[error("undefined capability: {name}")]
    UndefinedCapability { name: String },

    // Calls
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("{name} expects {min} to {max} arguments, got {got}")]
    ArityOutOfRange {
        name: String,
        min: usize,
        max: usize,
        got: usize,
    },
}

/// Additional context attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EvalNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "note: {}", self.message)
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Context notes, innermost first.
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            notes: Vec::new(),
        }
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(EvalNote::new(note));
        self
    }

    /// Whether this error comes from narrowing a value to the wrong variant.
    ///
    /// These are the errors a legacy embedding treats as process-fatal.
    #[inline]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, EvalErrorKind::TypeMismatch { .. })
    }

    /// Render the error with its notes, one per line.
    pub fn render(&self) -> String {
        let mut out = self.kind.to_string();
        for note in &self.notes {
            out.push_str("\n  ");
            out.push_str(&note.to_string());
        }
        out
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

// Narrowing Errors

/// Value narrowed to the wrong variant.
#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

// Operator Errors

/// Operand combination outside the promotion lattice.
#[cold]
pub fn unsupported_operation(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

/// Division by zero error.
#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// Integer overflow error.
#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Capability Errors

/// A capability could not acquire or use its host resource.
#[cold]
pub fn resource_unavailable(resource: &str, reason: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ResourceUnavailable {
        resource: resource.to_string(),
        reason: reason.to_string(),
    })
}

/// Method name not present in a capability's method table.
#[cold]
pub fn undefined_method(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

/// No capability registered under this name.
#[cold]
pub fn undefined_capability(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedCapability {
        name: name.to_string(),
    })
}

// Call Errors

/// Wrong number of arguments for a fixed-arity callee.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Argument count outside an accepted range.
#[cold]
pub fn arity_out_of_range(name: &str, min: usize, max: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityOutOfRange {
        name: name.to_string(),
        min,
        max,
        got,
    })
}
