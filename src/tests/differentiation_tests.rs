use std::collections::HashMap;

use crate::{Cas, Expr};

/// Central difference of `function` at `x`
fn numeric_derivative(cas: &Cas, function: &Expr, x: f64) -> f64 {
    let h = 1e-6;
    let at = |x: f64| cas.evaluate(function, &HashMap::from([("x", x)])).unwrap();
    (at(x + h) - at(x - h)) / (2.0 * h)
}

#[test]
fn test_matches_central_difference() {
    let cas = Cas::new();
    for input in [
        "x^3 - 2x",
        "sin(x)*cos(x)",
        "ln(x^2 + 1)",
        "sqrt(x)",
        "e^(2x)",
        "x^x",
        "atan(x)/x",
        "1/(x + 2)",
        "abs(x - 2)",
        "asin(x/2)",
        "acos(x)",
        "tan(x)",
        "2^x",
        "x^(1/3)",
        "sin(x^2)^3",
    ] {
        let function = cas.parse(input).unwrap();
        let derivative = cas.differentiate(&function, "x").unwrap();
        for x in [0.3, 0.7] {
            let symbolic = cas
                .evaluate(&derivative, &HashMap::from([("x", x)]))
                .unwrap();
            let numeric = numeric_derivative(&cas, &function, x);
            assert!(
                (symbolic - numeric).abs() < 1e-6 * numeric.abs().max(1.0),
                "d/dx {input} at {x}: {derivative} = {symbolic}, expected {numeric}"
            );
        }
    }
}

#[test]
fn test_simplified_results() {
    let cas = Cas::new();
    let derive = |input: &str| {
        let expr = cas.parse(input).unwrap();
        cas.to_plain_text(&cas.differentiate(&expr, "x").unwrap())
    };
    assert_eq!(derive("x^3"), "3*x^2");
    assert_eq!(derive("x^2 + 2x"), "2 + 2*x");
    assert_eq!(derive("5"), "0");
    assert_eq!(derive("y"), "0");
    assert_eq!(derive("x"), "1");
    assert_eq!(derive("sin(x)"), "cos(x)");
}

#[test]
fn test_other_variables_are_constant() {
    let cas = Cas::new();
    let expr = cas.parse("x*y + y^2").unwrap();
    let by_y = cas.differentiate(&expr, "y").unwrap();
    let value = cas
        .evaluate(&by_y, &HashMap::from([("x", 3.0), ("y", 2.0)]))
        .unwrap();
    assert!((value - 7.0).abs() < 1e-12);
}

#[test]
fn test_equation_sides() {
    let cas = Cas::new();
    let equation = cas.parse("x^2 = 3x").unwrap();
    let derivative = cas.differentiate(&equation, "x").unwrap();
    assert_eq!(cas.to_plain_text(&derivative), "2*x = 3");
}
