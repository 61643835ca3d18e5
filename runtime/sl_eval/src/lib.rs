//! SL Eval - Embedding runtime for simplelisp values.
//!
//! This crate is what a host links against to run scripts. It wraps the
//! value layer from `sl_value` with:
//! - `RuntimeConfig`: operator and type-mismatch policies, loadable from the environment
//! - `Runtime` / `RuntimeBuilder`: the façade the evaluator calls for operators,
//!   function calls, capability construction and method dispatch
//! - `print` / `write` built-ins over a configurable print handler
//! - `CapabilityRegistry` with the built-in `file` capability
//!
//! # Re-exports
//!
//! Value and error types are re-exported from `sl_value` so embedders only
//! need this crate.

pub mod builtins;
pub mod capabilities;
mod config;
mod fatal;
mod print_handler;
mod runtime;
mod tracing_setup;

pub use sl_value::{
    evaluate_binary, BinaryOp, Capability, CapabilityObject, EvalError, EvalErrorKind, EvalResult,
    FunctionValue, MethodTable, ObjectRef, OperatorPolicy, ParsePolicyError, Value,
};

pub use capabilities::{CapabilityRegistry, FileObject};
pub use config::{ConfigError, MismatchPolicy, RuntimeConfig};
pub use fatal::abort_on_mismatch;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use runtime::{Runtime, RuntimeBuilder};
pub use tracing_setup::init_tracing;
