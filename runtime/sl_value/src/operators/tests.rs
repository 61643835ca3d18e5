//! Tests for the coercion engine.

use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn lenient(left: &Value, right: &Value, op: BinaryOp) -> Value {
    match evaluate_binary(left, right, op, OperatorPolicy::Lenient) {
        Ok(v) => v,
        Err(e) => panic!("lenient evaluation failed: {e}"),
    }
}

fn strict(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    evaluate_binary(left, right, op, OperatorPolicy::Strict)
}

fn assert_str(value: &Value, expected: &str) {
    match value {
        Value::Str(s) => assert_eq!(s, expected),
        other => panic!("expected string, got {other:?}"),
    }
}

// Integer arithmetic

#[test]
fn test_int_operations() {
    assert_eq!(Value::int(2) + Value::int(3), Value::int(5));
    assert_eq!(Value::int(5) - Value::int(3), Value::int(2));
    assert_eq!(Value::int(2) * Value::int(3), Value::int(6));
    assert_eq!(Value::int(7) / Value::int(2), Value::int(3));
}

#[test]
fn int_division_truncates_toward_zero() {
    assert_eq!(Value::int(-7) / Value::int(2), Value::int(-3));
    assert_eq!(Value::int(7) / Value::int(-2), Value::int(-3));
}

#[test]
fn int_results_stay_int() {
    assert!((Value::int(7) / Value::int(2)).is_int());
}

#[test]
fn lenient_int_overflow_wraps() {
    assert_eq!(Value::int(i32::MAX) + Value::int(1), Value::int(i32::MIN));
    assert_eq!(Value::int(i32::MIN) / Value::int(-1), Value::int(i32::MIN));
}

#[test]
fn lenient_int_division_by_zero_is_null() {
    assert!((Value::int(1) / Value::int(0)).is_null());
}

#[test]
fn strict_int_overflow_is_error() {
    let err = strict(&Value::int(i32::MAX), &Value::int(1), BinaryOp::Add);
    assert_eq!(
        err.map_err(|e| e.kind),
        Err(EvalErrorKind::IntegerOverflow {
            operation: "addition".to_string()
        })
    );
    let err = strict(&Value::int(i32::MIN), &Value::int(-1), BinaryOp::Div);
    assert!(err.is_err());
}

#[test]
fn strict_division_by_zero_is_error() {
    let err = strict(&Value::int(1), &Value::int(0), BinaryOp::Div);
    assert_eq!(err.map_err(|e| e.kind), Err(EvalErrorKind::DivisionByZero));
}

// Mixed promotion

#[test]
fn mixed_int_float_promotes_to_float() {
    let sum = Value::int(2) + Value::float(1.5);
    assert!(sum.is_float());
    assert_eq!(sum, Value::float(3.5));
    assert_eq!(Value::float(1.5) + Value::int(2), Value::float(3.5));
    assert_eq!(Value::float(0.5) * Value::float(4.0), Value::float(2.0));
}

#[test]
fn float_division_does_not_truncate() {
    let q = Value::float(7.0) / Value::int(2);
    assert!(q.is_float());
    assert_eq!(q, Value::float(3.5));
    assert_eq!(Value::int(7) / Value::float(2.0), Value::float(3.5));
}

#[test]
fn float_division_by_zero_is_infinite() {
    let q = Value::float(1.0) / Value::int(0);
    assert!(matches!(q, Value::Float(f) if f.is_infinite()));
}

// Text

#[test]
fn text_plus_number_appends() {
    assert_str(&(Value::string("x") + Value::int(1)), "x1");
    assert_str(&(Value::string("x") + Value::float(1.5)), "x1.500000");
}

#[test]
fn number_plus_text_prefixes() {
    assert_str(&(Value::int(1) + Value::string("x")), "1x");
    assert_str(&(Value::float(2.25) + Value::string("x")), "2.250000x");
    assert_str(&(Value::float(-3.0) + Value::string("")), "-3.000000");
}

#[test]
fn spliced_floats_differ_from_display() {
    let f = Value::float(1.5);
    assert_eq!(f.to_string(), "1.5");
    assert_str(&(Value::string("x") + f.clone()), "x1.500000");
    assert_str(&(f + Value::string("x")), "1.500000x");
}

#[test]
fn text_concatenation() {
    assert_str(
        &(Value::string("hello") + Value::string(" world")),
        "hello world",
    );
}

#[test]
fn text_repetition() {
    assert_str(&(Value::string("ab") * Value::int(3)), "ababab");
    assert_str(&(Value::string("ab") * Value::int(0)), "");
    assert_str(&(Value::string("ab") * Value::int(-2)), "");
}

#[test]
fn int_times_text_is_unsupported() {
    assert!((Value::int(3) * Value::string("ab")).is_null());
}

// Unsupported combinations

#[test]
fn lenient_unsupported_arithmetic_is_null() {
    let list = Value::list(vec![Value::int(1)]);
    let func = Value::function(|_| Ok(Value::Null));
    let cases = [
        (Value::string("a"), Value::string("b"), BinaryOp::Sub),
        (Value::string("a"), Value::int(2), BinaryOp::Div),
        (Value::string("a"), Value::float(2.0), BinaryOp::Mul),
        (Value::int(1), Value::string("a"), BinaryOp::Sub),
        (list.clone(), list.clone(), BinaryOp::Add),
        (list, Value::int(1), BinaryOp::Mul),
        (func.clone(), Value::int(1), BinaryOp::Add),
        (Value::Null, Value::int(1), BinaryOp::Add),
        (Value::int(1), func, BinaryOp::Add),
    ];
    for (l, r, op) in &cases {
        assert!(lenient(l, r, *op).is_null(), "{l:?} {op} {r:?}");
    }
}

#[test]
fn strict_unsupported_arithmetic_is_error() {
    let err = strict(&Value::string("a"), &Value::string("b"), BinaryOp::Sub);
    assert_eq!(
        err.map_err(|e| e.kind),
        Err(EvalErrorKind::UnsupportedOperation {
            op: BinaryOp::Sub,
            left: "string".to_string(),
            right: "string".to_string(),
        })
    );
}

#[test]
fn strict_error_describes_list_operands() {
    let list = Value::list(vec![Value::int(1), Value::string("x")]);
    let Err(err) = strict(&list, &Value::int(1), BinaryOp::Add) else {
        panic!("expected error");
    };
    assert_eq!(
        err.to_string(),
        "operator `+` cannot be applied to `[ int string ]` and `int`"
    );
}

#[test]
fn strict_supported_arithmetic_matches_lenient() {
    let cases = [
        (Value::int(2), Value::float(1.5), BinaryOp::Add),
        (Value::string("ab"), Value::int(2), BinaryOp::Mul),
        (Value::int(9), Value::int(4), BinaryOp::Div),
    ];
    for (l, r, op) in &cases {
        assert_eq!(strict(l, r, *op), Ok(lenient(l, r, *op)));
    }
}

// Ordering

#[test]
fn ordering_numbers_and_text() {
    assert!(Value::int(1).less_than(&Value::int(2)));
    assert!(Value::int(1).less_than(&Value::float(1.5)));
    assert!(Value::float(0.5).less_than(&Value::int(1)));
    assert!(Value::float(0.5).less_than(&Value::float(0.75)));
    assert!(Value::string("abc").less_than(&Value::string("abd")));
    assert!(!Value::string("b").less_than(&Value::string("a")));
}

#[test]
fn derived_ordering_operators() {
    let one = Value::int(1);
    let two = Value::int(2);
    assert!(two.greater_than(&one));
    assert!(one.less_equal(&two));
    assert!(one.less_equal(&one));
    assert!(two.greater_equal(&one));
    assert!(!one.greater_equal(&two));
}

#[test]
fn incomparable_pairs_are_not_ordered_either_way() {
    let a = Value::string("x");
    let b = Value::int(1);
    assert!(!a.less_than(&b));
    assert!(!b.less_than(&a));
    assert!(a != b);
    assert!(!a.is_comparable_with(&b));
    // <= and >= are negations of <, so they hold for incomparable pairs
    assert!(a.less_equal(&b));
    assert!(a.greater_equal(&b));
}

#[test]
fn comparison_operators_produce_int_truth_values() {
    let one = Value::int(1);
    let two = Value::int(2);
    assert_eq!(lenient(&one, &two, BinaryOp::Lt), Value::int(1));
    assert_eq!(lenient(&one, &two, BinaryOp::Gt), Value::int(0));
    assert_eq!(lenient(&one, &two, BinaryOp::LtEq), Value::int(1));
    assert_eq!(lenient(&two, &two, BinaryOp::GtEq), Value::int(1));
    assert_eq!(lenient(&one, &one, BinaryOp::Eq), Value::int(1));
    assert_eq!(lenient(&one, &two, BinaryOp::NotEq), Value::int(1));
}

#[test]
fn lenient_incomparable_ordering() {
    let a = Value::string("x");
    let b = Value::list(vec![]);
    assert_eq!(lenient(&a, &b, BinaryOp::Lt), Value::int(0));
    assert_eq!(lenient(&a, &b, BinaryOp::Gt), Value::int(0));
    assert_eq!(lenient(&a, &b, BinaryOp::LtEq), Value::int(1));
    assert_eq!(lenient(&a, &b, BinaryOp::GtEq), Value::int(1));
}

#[test]
fn strict_incomparable_ordering_is_error() {
    let Err(err) = strict(&Value::string("x"), &Value::int(1), BinaryOp::Gt) else {
        panic!("expected error");
    };
    // Operands are reported in source order even though `>` swaps them
    assert_eq!(
        err.to_string(),
        "operator `>` cannot be applied to `string` and `int`"
    );
}

#[test]
fn strict_equality_is_total() {
    assert_eq!(
        strict(&Value::string("x"), &Value::int(1), BinaryOp::Eq),
        Ok(Value::int(0))
    );
    assert_eq!(
        strict(&Value::Null, &Value::Null, BinaryOp::NotEq),
        Ok(Value::int(1))
    );
}

// Equality

#[test]
fn numeric_equality_widens() {
    assert_eq!(Value::int(2), Value::float(2.0));
    assert_eq!(Value::float(2.0), Value::int(2));
    assert_ne!(Value::float(2.5), Value::int(2));
}

#[test]
fn float_left_equality_compares_values() {
    // A sum-based comparison would call these equal
    assert_ne!(Value::float(1.0), Value::float(2.0));
    assert_ne!(Value::float(1.0), Value::int(3));
    assert_eq!(Value::float(-0.0), Value::float(0.0));
    assert_ne!(Value::float(f32::NAN), Value::float(f32::NAN));
}

#[test]
fn non_scalar_values_are_never_equal() {
    assert_ne!(Value::Null, Value::Null);
    let list = Value::list(vec![Value::int(1)]);
    assert_ne!(list, list.clone());
    let func = Value::function(|_| Ok(Value::Null));
    assert_ne!(func, func.clone());
    assert_ne!(Value::int(1), Value::string("1"));
}

// Properties

#[test]
fn operator_policy_parses_case_insensitively() {
    assert_eq!("lenient".parse::<OperatorPolicy>(), Ok(OperatorPolicy::Lenient));
    assert_eq!(" Strict ".parse::<OperatorPolicy>(), Ok(OperatorPolicy::Strict));
    assert_eq!(
        "loose".parse::<OperatorPolicy>(),
        Err(ParsePolicyError::new("loose"))
    );
    assert_eq!(OperatorPolicy::Strict.as_str(), "strict");
}

proptest! {
    #[test]
    fn int_addition_wraps(a in any::<i32>(), b in any::<i32>()) {
        prop_assert!(matches!(Value::int(a) + Value::int(b), Value::Int(n) if n == a.wrapping_add(b)));
    }

    #[test]
    fn strict_addition_errors_exactly_on_overflow(a in any::<i32>(), b in any::<i32>()) {
        let result = strict(&Value::int(a), &Value::int(b), BinaryOp::Add);
        prop_assert_eq!(result.is_err(), a.checked_add(b).is_none());
    }

    #[test]
    fn int_division_truncates(a in any::<i32>(), b in any::<i32>().prop_filter("non-zero", |b| *b != 0)) {
        prop_assert!(matches!(Value::int(a) / Value::int(b), Value::Int(n) if n == a.wrapping_div(b)));
    }

    #[test]
    fn gt_is_swapped_lt(a in any::<i32>(), b in any::<i32>()) {
        let (va, vb) = (Value::int(a), Value::int(b));
        prop_assert_eq!(va.greater_than(&vb), vb.less_than(&va));
        prop_assert_eq!(va.less_than(&vb), a < b);
    }

    #[test]
    fn text_repetition_length(s in "[a-z]{0,4}", n in -3i32..6) {
        let repeated = Value::string(s.clone()) * Value::int(n);
        let expected_len = s.len() * usize::try_from(n).unwrap_or(0);
        prop_assert!(matches!(repeated, Value::Str(ref r) if r.len() == expected_len));
    }
}
