//! Binary operators and the coercion rules behind them.
//!
//! Dispatch is on the left operand first, then the right:
//!
//! | left ∘ right          | result                                  |
//! |-----------------------|-----------------------------------------|
//! | int ∘ int             | int (truncating division)               |
//! | int ∘ float, float ∘ int, float ∘ float | float (int widened)   |
//! | string + int/float    | string, number appended                 |
//! | int/float + string    | string, number prefixed                 |
//! | string + string       | string                                  |
//! | string * int          | string repeated (count ≤ 0 gives "")    |
//!
//! Every other arithmetic combination is unsupported. Under
//! `OperatorPolicy::Lenient` it yields `NULL`; under `Strict` it is an error.
//!
//! Ordering is only defined between numbers and between strings. `>`, `<=`
//! and `>=` are derived from `<`, so for incomparable operands `<` and `>`
//! are false while `<=` and `>=` are true. Equality is total: anything the
//! table above does not relate is simply unequal.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use crate::errors::{
    division_by_zero, integer_overflow, unsupported_operation, EvalError, EvalResult,
};
use crate::op::BinaryOp;
use crate::value::Value;

/// How unsupported operand combinations and integer edge cases are handled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OperatorPolicy {
    /// Legacy behaviour: unsupported arithmetic yields `NULL`, unsupported
    /// ordering yields false, integers wrap, and integer division by zero
    /// yields `NULL`.
    #[default]
    Lenient,
    /// Unsupported combinations, integer overflow and integer division by
    /// zero are reported as errors.
    Strict,
}

impl OperatorPolicy {
    /// Lowercase name, as accepted by `FromStr`.
    pub const fn as_str(self) -> &'static str {
        match self {
            OperatorPolicy::Lenient => "lenient",
            OperatorPolicy::Strict => "strict",
        }
    }
}

impl FromStr for OperatorPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(OperatorPolicy::Lenient),
            "strict" => Ok(OperatorPolicy::Strict),
            _ => Err(ParsePolicyError::new(s)),
        }
    }
}

/// A policy name that matches none of the known variants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized policy `{input}`")]
pub struct ParsePolicyError {
    pub input: String,
}

impl ParsePolicyError {
    pub fn new(input: impl Into<String>) -> Self {
        ParsePolicyError {
            input: input.into(),
        }
    }
}

/// Arithmetic subset of `BinaryOp`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
}

impl Arith {
    fn op(self) -> BinaryOp {
        match self {
            Arith::Add => BinaryOp::Add,
            Arith::Sub => BinaryOp::Sub,
            Arith::Mul => BinaryOp::Mul,
            Arith::Div => BinaryOp::Div,
        }
    }

    fn operation_name(self) -> &'static str {
        match self {
            Arith::Add => "addition",
            Arith::Sub => "subtraction",
            Arith::Mul => "multiplication",
            Arith::Div => "division",
        }
    }
}

// Direct Dispatch Function

/// Evaluate a binary operation under the given policy.
///
/// Comparison operators produce `int` truth values (`1` or `0`).
pub fn evaluate_binary(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    policy: OperatorPolicy,
) -> EvalResult {
    match op {
        BinaryOp::Add => eval_arithmetic(left, right, Arith::Add, policy),
        BinaryOp::Sub => eval_arithmetic(left, right, Arith::Sub, policy),
        BinaryOp::Mul => eval_arithmetic(left, right, Arith::Mul, policy),
        BinaryOp::Div => eval_arithmetic(left, right, Arith::Div, policy),
        BinaryOp::Eq => Ok(Value::from(left == right)),
        BinaryOp::NotEq => Ok(Value::from(left != right)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            eval_ordering(left, right, op, policy)
        }
    }
}

// Arithmetic

fn eval_arithmetic(left: &Value, right: &Value, arith: Arith, policy: OperatorPolicy) -> EvalResult {
    let result = match (left, right) {
        (Value::Int(a), Value::Int(b)) => return eval_int_binary(*a, *b, arith, policy),
        (Value::Int(a), Value::Float(b)) => Some(eval_float_binary(widen(*a), *b, arith)),
        (Value::Float(a), Value::Int(b)) => Some(eval_float_binary(*a, widen(*b), arith)),
        (Value::Float(a), Value::Float(b)) => Some(eval_float_binary(*a, *b, arith)),
        (Value::Str(a), _) => eval_text_left(a, right, arith),
        (Value::Int(_) | Value::Float(_), Value::Str(b)) if arith == Arith::Add => {
            Some(Value::string(format!("{}{b}", number_text(left))))
        }
        _ => None,
    };
    match result {
        Some(value) => Ok(value),
        None => unsupported(left, right, arith.op(), policy),
    }
}

/// Integer arithmetic.
///
/// Lenient mode uses two's-complement wrapping; strict mode goes through the
/// checked methods so overflow is reported instead.
fn eval_int_binary(a: i32, b: i32, arith: Arith, policy: OperatorPolicy) -> EvalResult {
    if policy == OperatorPolicy::Strict {
        return eval_int_checked(a, b, arith);
    }
    Ok(match arith {
        Arith::Add => Value::Int(a.wrapping_add(b)),
        Arith::Sub => Value::Int(a.wrapping_sub(b)),
        Arith::Mul => Value::Int(a.wrapping_mul(b)),
        Arith::Div if b == 0 => {
            tracing::trace!("integer division by zero, yielding NULL");
            Value::Null
        }
        Arith::Div => Value::Int(a.wrapping_div(b)),
    })
}

fn eval_int_checked(a: i32, b: i32, arith: Arith) -> EvalResult {
    let result = match arith {
        Arith::Add => a.checked_add(b),
        Arith::Sub => a.checked_sub(b),
        Arith::Mul => a.checked_mul(b),
        Arith::Div if b == 0 => return Err(division_by_zero()),
        Arith::Div => a.checked_div(b),
    };
    checked_arith(result, arith.operation_name())
}

/// Checked arithmetic result with overflow handling.
#[inline]
fn checked_arith(result: Option<i32>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Float arithmetic, IEEE semantics (division by zero gives infinity or NaN).
fn eval_float_binary(a: f32, b: f32, arith: Arith) -> Value {
    Value::Float(match arith {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => a / b,
    })
}

/// Arithmetic with a string on the left.
fn eval_text_left(a: &str, right: &Value, arith: Arith) -> Option<Value> {
    match (arith, right) {
        (Arith::Add, Value::Int(_) | Value::Float(_)) => {
            Some(Value::string(format!("{a}{}", number_text(right))))
        }
        (Arith::Add, Value::Str(b)) => {
            let mut result = String::with_capacity(a.len() + b.len());
            result.push_str(a);
            result.push_str(b);
            Some(Value::string(result))
        }
        (Arith::Mul, Value::Int(count)) => Some(Value::string(repeat_text(a, *count))),
        _ => None,
    }
}

/// A number as it is spliced into text: floats always carry six decimals
/// (`1.5` becomes `1.500000`), unlike `Display`.
fn number_text(n: &Value) -> String {
    match n {
        Value::Float(f) => format!("{f:.6}"),
        other => other.to_string(),
    }
}

/// Repeat `text` `count` times; non-positive counts give an empty string.
fn repeat_text(text: &str, count: i32) -> String {
    usize::try_from(count).map_or_else(|_| String::new(), |n| text.repeat(n))
}

// Ordering

/// `Some(a < b)` when the operands are comparable, `None` otherwise.
fn less_than_checked(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a < b),
        (Value::Int(a), Value::Float(b)) => Some(widen(*a) < *b),
        (Value::Float(a), Value::Int(b)) => Some(*a < widen(*b)),
        (Value::Float(a), Value::Float(b)) => Some(a < b),
        // Lexicographic, by bytes
        (Value::Str(a), Value::Str(b)) => Some(a < b),
        _ => None,
    }
}

fn eval_ordering(left: &Value, right: &Value, op: BinaryOp, policy: OperatorPolicy) -> EvalResult {
    // a > b is b < a, a <= b is !(b < a), a >= b is !(a < b).
    let (lhs, rhs, negate) = match op {
        BinaryOp::Gt => (right, left, false),
        BinaryOp::LtEq => (right, left, true),
        BinaryOp::GtEq => (left, right, true),
        _ => (left, right, false),
    };
    match less_than_checked(lhs, rhs) {
        Some(less) => Ok(Value::from(less != negate)),
        None => match policy {
            OperatorPolicy::Lenient => Ok(Value::from(negate)),
            OperatorPolicy::Strict => Err(unsupported_error(left, right, op)),
        },
    }
}

// Fallback

fn unsupported(left: &Value, right: &Value, op: BinaryOp, policy: OperatorPolicy) -> EvalResult {
    match policy {
        OperatorPolicy::Lenient => {
            tracing::trace!(
                %op,
                left = %left.type_name(),
                right = %right.type_name(),
                "unsupported operands, yielding NULL"
            );
            Ok(Value::Null)
        }
        OperatorPolicy::Strict => Err(unsupported_error(left, right, op)),
    }
}

#[cold]
fn unsupported_error(left: &Value, right: &Value, op: BinaryOp) -> EvalError {
    unsupported_operation(op, &left.type_name(), &right.type_name())
}

/// Widen an integer operand for mixed int/float operations.
#[inline]
#[expect(
    clippy::cast_precision_loss,
    reason = "int operands are widened to float by definition of mixed arithmetic"
)]
fn widen(n: i32) -> f32 {
    n as f32
}

// Value-level comparison API

impl Value {
    /// `self < other`; false for incomparable operands.
    pub fn less_than(&self, other: &Value) -> bool {
        less_than_checked(self, other).unwrap_or(false)
    }

    /// `self > other`, defined as `other < self`.
    pub fn greater_than(&self, other: &Value) -> bool {
        other.less_than(self)
    }

    /// `self <= other`, defined as `!(other < self)`.
    pub fn less_equal(&self, other: &Value) -> bool {
        !other.less_than(self)
    }

    /// `self >= other`, defined as `!(self < other)`.
    pub fn greater_equal(&self, other: &Value) -> bool {
        !self.less_than(other)
    }

    /// Whether `<` is defined between the two operands.
    pub fn is_comparable_with(&self, other: &Value) -> bool {
        less_than_checked(self, other).is_some()
    }
}

/// Numeric equality widens ints; strings compare by content. Everything
/// else, including `NULL`, lists, functions and objects, is never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(a), Value::Float(b)) => float_eq(widen(*a), *b),
            (Value::Float(a), Value::Int(b)) => float_eq(*a, widen(*b)),
            (Value::Float(a), Value::Float(b)) => float_eq(*a, *b),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

/// IEEE 754 equality (NaN != NaN, -0.0 == 0.0).
#[inline]
fn float_eq(a: f32, b: f32) -> bool {
    a.partial_cmp(&b) == Some(Ordering::Equal)
}

// Operator traits (lenient policy)

macro_rules! impl_lenient_op {
    ($trait:ident, $method:ident, $arith:expr) => {
        impl $trait<&Value> for &Value {
            type Output = Value;

            fn $method(self, rhs: &Value) -> Value {
                // Lenient evaluation has no error path.
                eval_arithmetic(self, rhs, $arith, OperatorPolicy::Lenient).unwrap_or_default()
            }
        }

        impl $trait for Value {
            type Output = Value;

            fn $method(self, rhs: Value) -> Value {
                $trait::$method(&self, &rhs)
            }
        }
    };
}

impl_lenient_op!(Add, add, Arith::Add);
impl_lenient_op!(Sub, sub, Arith::Sub);
impl_lenient_op!(Mul, mul, Arith::Mul);
impl_lenient_op!(Div, div, Arith::Div);

#[cfg(test)]
mod tests;
