//! Script-visible built-in functions.
//!
//! Both take one or two values, stringify them back to back and send the
//! result to the print handler. `print` ends the line, `write` does not.

use std::sync::Arc;

use sl_value::{arity_out_of_range, EvalError, EvalResult, Value};

use crate::print_handler::{PrintHandlerImpl, SharedPrintHandler};

pub const PRINT: &str = "print";
pub const WRITE: &str = "write";

/// Names of every built-in, in registration order.
pub const BUILTIN_NAMES: [&str; 2] = [PRINT, WRITE];

/// `print(v)` / `print(v1, v2)`.
pub fn builtin_print(handler: &PrintHandlerImpl, args: &[Value]) -> EvalResult {
    let text = render_args(PRINT, args)?;
    handler.println(&text);
    Ok(Value::Null)
}

/// `write(v)` / `write(v1, v2)`.
pub fn builtin_write(handler: &PrintHandlerImpl, args: &[Value]) -> EvalResult {
    let text = render_args(WRITE, args)?;
    handler.print(&text);
    Ok(Value::Null)
}

fn render_args(name: &str, args: &[Value]) -> Result<String, EvalError> {
    match args {
        [only] => Ok(only.to_string()),
        [first, second] => Ok(format!("{first}{second}")),
        _ => Err(arity_out_of_range(name, 1, 2, args.len())),
    }
}

/// A built-in as a callable `Value` bound to `handler`.
pub fn builtin_function(name: &str, handler: &SharedPrintHandler) -> Option<Value> {
    let handler = Arc::clone(handler);
    match name {
        PRINT => Some(Value::named_function(PRINT, move |args| {
            builtin_print(&handler, args)
        })),
        WRITE => Some(Value::named_function(WRITE, move |args| {
            builtin_write(&handler, args)
        })),
        _ => None,
    }
}
