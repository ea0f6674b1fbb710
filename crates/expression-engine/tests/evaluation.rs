//! Test expression evaluation against parameter bags

use expression_engine::{Evaluator, ExpressionError, Params, TestExpression, params, test};
use serde_json::json;
use std::collections::HashMap;

#[test]
fn test_numeric_comparison_with_digit_value() {
    let bag = params! { "age" => "15" };

    assert!(test("age > 10", &bag).unwrap());
    assert!(!test("age < 10", &bag).unwrap());
    assert!(test("age == '15'", &bag).unwrap());
}

#[test]
fn test_non_numeric_value_forces_string_comparison() {
    let bag = params! { "age" => "abc" };

    assert!(!test("age < 10", &bag).unwrap());
    assert!(!test("age >= 10", &bag).unwrap());
    assert!(test("age != 10", &bag).unwrap());
}

#[test]
fn test_equality_on_strings() {
    let bag = json!({ "name": "Jane" });

    assert!(test("name == 'Jane'", &bag).unwrap());
    assert!(test("name == \"Jane\"", &bag).unwrap());
    assert!(!test("name != 'Jane'", &bag).unwrap());
}

#[test]
fn test_absent_and_null_properties_behave_alike() {
    let mut bag = Params::new();
    bag.insert_null("name");

    for params in [&bag, &Params::new()] {
        assert!(!test("name == 'Jane'", params).unwrap());
        assert!(test("name != 'Jane'", params).unwrap());
        assert!(test("name == null", params).unwrap());
    }
}

#[test]
fn test_typed_values_are_rendered_as_text() {
    let mut bag: HashMap<&str, i64> = HashMap::new();
    bag.insert("count", 3);

    assert!(test("count <= 3", &bag).unwrap());
    assert!(!test("count > 3", &bag).unwrap());
}

#[test]
fn test_parsed_expression_is_reusable() {
    let expr = TestExpression::parse("status == 'open'").unwrap();

    assert!(expr.evaluate(&params! { "status" => "open" }).unwrap());
    assert!(!expr.evaluate(&params! { "status" => "closed" }).unwrap());
    assert!(!expr.evaluate(&()).unwrap());
}

#[test]
fn test_errors_are_reported() {
    let bag = params! { "age" => 15 };

    assert!(matches!(
        test("age", &bag),
        Err(ExpressionError::MalformedExpression(_))
    ));
    assert!(matches!(
        test("age =~ 10", &bag),
        Err(ExpressionError::UnknownOperator { .. })
    ));
    assert!(matches!(
        test("age > ten", &bag),
        Err(ExpressionError::NonNumericLiteral { .. })
    ));
}
