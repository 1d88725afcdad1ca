use std::collections::HashMap;
use std::f64::consts::{E, PI};

use crate::{Cas, CasError, EvaluationError};

const EPSILON: f64 = 1e-9;

fn evaluate(input: &str, values: &[(&str, f64)]) -> f64 {
    let cas = Cas::new();
    let expr = cas.parse(input).unwrap();
    cas.evaluate(&expr, &values.iter().copied().collect()).unwrap()
}

fn assert_close(input: &str, values: &[(&str, f64)], expected: f64) {
    let actual = evaluate(input, values);
    assert!(
        (actual - expected).abs() < EPSILON,
        "{input}: expected {expected}, got {actual}"
    );
}

#[test]
fn test_constant_arithmetic() {
    assert_close("3 + 2", &[], 5.0);
    assert_close("2 * 2", &[], 4.0);
    assert_close("3 * 5 + 2 * 3", &[], 21.0);
    assert_close("3 * (5 + 2) * 3", &[], 63.0);
    assert_close("3 * (5 + 2)^2 * 3", &[], 441.0);
    assert_close("3*2+2*5-1*7*2*3+7-(18/3)*100/5", &[], -139.0);
    assert_close("(7-2)*7*3 + 4+4+6 * 5^3*3/5", &[], 563.0);
}

#[test]
fn test_power_is_right_associative() {
    assert_close("2^3^2", &[], 512.0);
    assert_close("2^(3^2)", &[], 512.0);
    assert_close("(2^3)^2", &[], 64.0);
}

#[test]
fn test_bound_variables() {
    let values = [("x", 10.0), ("y", 5.0), ("z", 7.0), ("arg", 11.0)];
    assert_close("3 + x", &values, 13.0);
    assert_close("3 + x + y", &values, 18.0);
    assert_close("x + y * z", &values, 45.0);
    assert_close("x + 3 - 3^y", &values, -230.0);
    assert_close("arg * x + 1 * 2", &values, 112.0);
    assert_close("x + pi + e", &values, 10.0 + PI + E);
}

#[test]
fn test_functions_and_implicit_products() {
    let values = [("x", 10.0)];
    assert_close("x^2 + 2x + 1", &values, 121.0);
    assert_close("x^2 - 2x + 1 + 3cos(0)", &values, 84.0);
    assert_close("5ln(e)", &values, 5.0);
    assert_close("8ln(e^e)/(4e)", &values, 2.0);
    assert_close("5x ln(e)", &values, 50.0);
}

#[test]
fn test_unbound_variable() {
    let cas = Cas::new();
    let expr = cas.parse("x + y").unwrap();
    let err = cas
        .evaluate(&expr, &HashMap::from([("x", 1.0)]))
        .unwrap_err();
    assert_eq!(
        err,
        CasError::Evaluation(EvaluationError::UnboundVariable("y".to_string()))
    );
}

#[test]
fn test_equation_has_no_value() {
    let cas = Cas::new();
    let expr = cas.parse("x = 1").unwrap();
    let result = cas.evaluate(&expr, &HashMap::from([("x", 1.0)]));
    assert!(matches!(result, Err(CasError::Evaluation(_))));
}
