use super::*;
use pretty_assertions::assert_eq;

#[test]
fn default_is_null() {
    assert!(Value::default().is_null());
}

#[test]
fn predicates_match_exactly_one_variant() {
    let values = [
        Value::Null,
        Value::int(1),
        Value::float(1.0),
        Value::string("x"),
        Value::list(vec![]),
        Value::function(|_| Ok(Value::Null)),
    ];
    for v in &values {
        let active = [
            v.is_null(),
            v.is_int(),
            v.is_float(),
            v.is_str(),
            v.is_list(),
            v.is_function(),
            v.is_object(),
        ];
        assert_eq!(active.iter().filter(|b| **b).count(), 1, "{v:?}");
    }
}

#[test]
fn type_names() {
    assert_eq!(Value::Null.type_name(), "NULL");
    assert_eq!(Value::int(1).type_name(), "int");
    assert_eq!(Value::float(1.0).type_name(), "float");
    assert_eq!(Value::string("x").type_name(), "string");
    assert_eq!(Value::function(|_| Ok(Value::Null)).type_name(), "function");
}

#[test]
fn list_type_name_is_recursive() {
    let v = Value::list(vec![Value::int(1), Value::string("x")]);
    assert_eq!(v.type_name(), "[ int string ]");

    let nested = Value::list(vec![v, Value::Null]);
    assert_eq!(nested.type_name(), "[ [ int string ] NULL ]");
    assert_eq!(nested.variant_name(), "list");
    assert_eq!(Value::list(vec![]).type_name(), "[ ]");
}

// Narrowing

#[test]
fn narrowing_returns_payload_on_match() {
    assert_eq!(Value::int(7).as_int(), Ok(7));
    assert_eq!(Value::float(2.5).as_float(), Ok(2.5));
    assert_eq!(Value::string("hi").as_str(), Ok("hi"));
    assert_eq!(
        Value::list(vec![Value::int(1)]).as_list().map(<[Value]>::len),
        Ok(1)
    );
}

#[test]
fn narrowing_text_to_function_is_type_mismatch() {
    let Err(err) = Value::string("x").as_function() else {
        panic!("expected mismatch");
    };
    assert!(err.is_type_mismatch());
    assert_eq!(err.to_string(), "type mismatch: expected function, got string");
}

#[test]
fn narrowing_reports_sequence_shape() {
    let Err(err) = Value::list(vec![Value::int(1)]).as_str() else {
        panic!("expected mismatch");
    };
    assert_eq!(err.to_string(), "type mismatch: expected string, got [ int ]");
}

#[test]
fn narrowing_to_object_fails_for_plain_values() {
    let Err(err) = Value::int(3).as_object() else {
        panic!("expected mismatch");
    };
    assert_eq!(err.to_string(), "type mismatch: expected instance, got int");
}

#[test]
fn float_is_not_narrowed_from_int() {
    assert!(Value::int(1).as_float().is_err());
    assert!(Value::float(1.0).as_int().is_err());
}

// Calls

#[test]
fn call_invokes_function() {
    let double = Value::named_function("double", |args| {
        let n = args[0].as_int()?;
        Ok(Value::int(n * 2))
    });
    assert_eq!(double.call(&[Value::int(21)]), Ok(Value::int(42)));
}

#[test]
fn call_on_non_function_is_type_mismatch() {
    let Err(err) = Value::int(1).call(&[]) else {
        panic!("expected mismatch");
    };
    assert!(err.is_type_mismatch());
}

#[test]
fn function_label_is_debug_only() {
    let f = FunctionValue::named("greet", |_| Ok(Value::Null));
    assert_eq!(f.name(), Some("greet"));
    assert_eq!(format!("{f:?}"), "<native-fn greet>");
    assert_eq!(FunctionValue::new(|_| Ok(Value::Null)).name(), None);

    // Label does not change display or equality
    let labeled = Value::from(f);
    assert_eq!(labeled.to_string(), "<function>");
    assert!(labeled != labeled.clone());
}

// Stringification

#[test]
fn display_scalars() {
    assert_eq!(Value::Null.to_string(), "NULL");
    assert_eq!(Value::int(-42).to_string(), "-42");
    assert_eq!(Value::float(3.5).to_string(), "3.5");
    assert_eq!(Value::float(3.0).to_string(), "3");
    assert_eq!(Value::string("hello world").to_string(), "hello world");
}

#[test]
fn display_list() {
    let v = Value::list(vec![Value::int(1), Value::string("x")]);
    assert_eq!(v.to_string(), "[ 1 x ]");
}

#[test]
fn display_nested_list() {
    let v = Value::list(vec![
        Value::list(vec![Value::int(1), Value::int(2)]),
        Value::list(vec![]),
        Value::Null,
    ]);
    assert_eq!(v.to_string(), "[ [ 1 2 ] [ ] NULL ]");
}

#[test]
fn display_functions_share_placeholder() {
    let a = Value::function(|_| Ok(Value::int(1)));
    let b = Value::named_function("b", |_| Ok(Value::int(2)));
    assert_eq!(a.to_string(), b.to_string());
}

// Ownership

#[test]
fn list_clone_is_independent() {
    let original = Value::list(vec![Value::int(1)]);
    let mut copy = original.clone();
    if let Value::List(items) = &mut copy {
        items.push(Value::int(2));
    }
    assert_eq!(original.to_string(), "[ 1 ]");
    assert_eq!(copy.to_string(), "[ 1 2 ]");
}

#[test]
fn conversions() {
    assert_eq!(Value::from(5), Value::int(5));
    assert_eq!(Value::from(1.5_f32), Value::float(1.5));
    assert_eq!(Value::from("a"), Value::string("a"));
    assert_eq!(Value::from(String::from("b")), Value::string("b"));
    assert_eq!(Value::from(true), Value::int(1));
    assert_eq!(Value::from(false), Value::int(0));
    assert!(Value::from(vec![Value::Null]).is_list());
}

#[test]
fn debug_output() {
    assert_eq!(format!("{:?}", Value::Null), "Null");
    assert_eq!(format!("{:?}", Value::string("a")), "Str(\"a\")");
    assert_eq!(
        format!("{:?}", Value::list(vec![Value::int(1), Value::float(2.0)])),
        "List([Int(1), Float(2.0)])"
    );
}
