//! The runtime façade an evaluator drives.
//!
//! `Runtime` holds the configured policies, the print handler and the
//! capability registry. Every operation that can hit a type mismatch goes
//! through `narrow`, which applies the mismatch policy in one place.

use sl_value::{
    evaluate_binary, undefined_method, BinaryOp, EvalError, EvalResult, OperatorPolicy, Value,
};

use crate::builtins::{builtin_function, builtin_print, builtin_write, BUILTIN_NAMES};
use crate::capabilities::CapabilityRegistry;
use crate::config::{ConfigError, RuntimeConfig};
use crate::fatal::abort_on_mismatch;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for `Runtime`.
///
/// Unset parts default to `RuntimeConfig::default()`, stdout output and
/// the built-in capabilities.
#[derive(Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    print_handler: Option<SharedPrintHandler>,
    capabilities: Option<CapabilityRegistry>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Where `print` and `write` send their output.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn capabilities(mut self, registry: CapabilityRegistry) -> Self {
        self.capabilities = Some(registry);
        self
    }

    pub fn build(self) -> Runtime {
        Runtime {
            config: self.config,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            capabilities: self.capabilities.unwrap_or_default(),
        }
    }
}

pub struct Runtime {
    config: RuntimeConfig,
    print_handler: SharedPrintHandler,
    capabilities: CapabilityRegistry,
}

impl Runtime {
    /// Runtime with default policies, stdout output and built-in capabilities.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Runtime configured from `SL_MODE`, `SL_OPERATORS` and `SL_ON_MISMATCH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(RuntimeBuilder::new()
            .config(RuntimeConfig::from_env()?)
            .build())
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Apply the mismatch policy to a result.
    ///
    /// Under `MismatchPolicy::Abort` a type mismatch never returns: the
    /// diagnostic is printed and the process exits. Everything else passes
    /// through unchanged.
    pub fn narrow<T>(&self, result: Result<T, EvalError>) -> Result<T, EvalError> {
        match result {
            Err(err) if self.config.on_mismatch.is_fatal(&err) => abort_on_mismatch(&err),
            other => other,
        }
    }

    /// Evaluate `left op right` under the configured operator policy.
    pub fn binary(&self, left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
        evaluate_binary(left, right, op, self.config.operators)
    }

    /// Call a function value.
    pub fn call(&self, callee: &Value, args: &[Value]) -> EvalResult {
        let func = self.narrow(callee.as_function())?;
        self.narrow(func.call(args))
    }

    /// Construct a fresh capability object by name.
    #[tracing::instrument(level = "debug", skip(self, arg))]
    pub fn construct(&self, capability: &str, arg: &Value) -> EvalResult {
        let object = self
            .capabilities
            .construct(capability, arg)
            .map_err(|err| err.with_note(format!("while constructing `{capability}`")));
        self.narrow(object).map(Value::Object)
    }

    /// Invoke `method` on a capability object.
    ///
    /// A method the object does not have yields `NULL` under the lenient
    /// operator policy and `UndefinedMethod` under the strict one.
    #[tracing::instrument(level = "debug", skip(self, receiver, args))]
    pub fn call_method(&self, receiver: &Value, method: &str, args: &[Value]) -> EvalResult {
        let object = self.narrow(
            receiver
                .as_object()
                .map_err(|err| err.with_note(format!("calling method `{method}`"))),
        )?;
        match object.call_method(method, args) {
            Some(result) => self.narrow(result.map_err(|err| {
                err.with_note(format!("in method `{method}` of {}", object.type_name()))
            })),
            None => match self.config.operators {
                OperatorPolicy::Lenient => {
                    tracing::trace!(
                        method,
                        type_name = object.type_name(),
                        "unknown method, yielding NULL"
                    );
                    Ok(Value::Null)
                }
                OperatorPolicy::Strict => Err(undefined_method(method, object.type_name())),
            },
        }
    }

    /// The `print` built-in.
    pub fn print(&self, args: &[Value]) -> EvalResult {
        builtin_print(&self.print_handler, args)
    }

    /// The `write` built-in.
    pub fn write(&self, args: &[Value]) -> EvalResult {
        builtin_write(&self.print_handler, args)
    }

    /// A built-in as a callable value, bound to this runtime's print handler.
    pub fn builtin(&self, name: &str) -> Option<Value> {
        builtin_function(name, &self.print_handler)
    }

    /// Every built-in with its callable value, for seeding a global scope.
    pub fn builtins(&self) -> Vec<(&'static str, Value)> {
        BUILTIN_NAMES
            .iter()
            .filter_map(|&name| self.builtin(name).map(|value| (name, value)))
            .collect()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
