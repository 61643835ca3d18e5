//! SL Value - Dynamic values for the simplelisp runtime.
//!
//! This crate provides:
//! - The tagged runtime value (`Value`) and its type predicates
//! - The coercion engine for binary operators (`evaluate_binary`)
//! - Evaluation error types (`EvalError`, `EvalErrorKind`, `EvalResult`)
//! - The capability object interface used to expose host objects to scripts
//!
//! # Ownership
//!
//! Text and list payloads are owned by the value and deep-copied on clone.
//! `Value::Object` is the only shared variant: cloning it aliases the same
//! capability instance through an `Rc`, so values are confined to one thread.

mod capability;
mod errors;
mod op;
mod operators;
mod value;

pub use capability::{Capability, CapabilityObject, MethodEntry, MethodFn, MethodTable, ObjectRef};
pub use errors::{EvalError, EvalErrorKind, EvalNote, EvalResult};
pub use op::BinaryOp;
pub use operators::{evaluate_binary, OperatorPolicy, ParsePolicyError};
pub use value::{FunctionValue, NativeFn, Value};

// Re-export error constructors for use by other crates
pub use errors::{
    arity_mismatch, arity_out_of_range, division_by_zero, integer_overflow, resource_unavailable,
    type_mismatch, undefined_capability, undefined_method, unsupported_operation,
};
