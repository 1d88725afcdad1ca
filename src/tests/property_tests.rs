//! Property-based and fuzz testing
//!
//! Uses quickcheck for:
//! - Parser robustness on arbitrary input
//! - Print/parse round trips of generated expressions
//! - Simplifier idempotence

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

use crate::Cas;

// ============================================================
// EXPRESSION GENERATORS
// ============================================================

/// Random well-formed expression text
#[derive(Debug, Clone)]
struct ExprString(String);

impl Arbitrary for ExprString {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = g.size().min(4);
        ExprString(gen_expr(g, depth, true))
    }
}

/// Tame subset for the simplifier: no unary signs, small exponents
#[derive(Debug, Clone)]
struct PolyString(String);

impl Arbitrary for PolyString {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = g.size().min(3);
        PolyString(gen_expr(g, depth, false))
    }
}

fn gen_leaf(g: &mut Gen, full: bool) -> String {
    match u8::arbitrary(g) % 6 {
        0 => (u8::arbitrary(g) % 10).to_string(),
        1 if full => format!("{}.{}", u8::arbitrary(g) % 10, u8::arbitrary(g) % 100),
        2 => "x".to_string(),
        3 => "y".to_string(),
        4 => "z".to_string(),
        _ => "1".to_string(),
    }
}

fn gen_expr(g: &mut Gen, depth: usize, full: bool) -> String {
    if depth == 0 {
        return gen_leaf(g, full);
    }
    match u8::arbitrary(g) % 10 {
        0..=3 => {
            let ops = ["+", "-", "*", "/", "^"];
            let op = ops[usize::arbitrary(g) % ops.len()];
            let left = gen_expr(g, depth - 1, full);
            let right = if op == "^" && !full {
                (u8::arbitrary(g) % 4).to_string()
            } else {
                gen_expr(g, depth - 1, full)
            };
            format!("({left} {op} {right})")
        }
        4..=5 => {
            let fns = if full {
                &["sin", "cos", "tan", "asin", "acos", "atan", "ln", "sqrt", "abs"][..]
            } else {
                &["sin", "cos", "ln"][..]
            };
            let f = fns[usize::arbitrary(g) % fns.len()];
            format!("{f}({})", gen_expr(g, depth - 1, full))
        }
        6 if full => format!("-({})", gen_expr(g, depth - 1, full)),
        _ => gen_expr(g, depth - 1, full),
    }
}

// ============================================================
// PROPERTIES
// ============================================================

#[test]
fn test_parser_never_panics_on_random_input() {
    fn prop_parser_no_panic(input: String) -> TestResult {
        let _ = Cas::new().parse(&input);
        TestResult::passed()
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(2000)
        .quickcheck(prop_parser_no_panic as fn(String) -> TestResult);
}

#[test]
fn test_printed_text_parses_to_same_tree() {
    fn prop_round_trip(input: ExprString) -> TestResult {
        let cas = Cas::new();
        let Ok(parsed) = cas.parse(&input.0) else {
            return TestResult::failed();
        };
        let printed = cas.to_plain_text(&parsed);
        match cas.parse(&printed) {
            Ok(reparsed) => TestResult::from_bool(reparsed == parsed),
            Err(_) => TestResult::failed(),
        }
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop_round_trip as fn(ExprString) -> TestResult);
}

#[test]
fn test_simplify_is_idempotent() {
    fn prop_idempotent(input: PolyString) -> TestResult {
        let cas = Cas::new();
        let Ok(parsed) = cas.parse(&input.0) else {
            return TestResult::discard();
        };
        let Ok(once) = cas.simplify(&parsed) else {
            return TestResult::discard();
        };
        match cas.simplify(&once) {
            Ok(twice) => TestResult::from_bool(twice == once),
            Err(_) => TestResult::discard(),
        }
    }
    QuickCheck::new()
        .tests(300)
        .max_tests(1000)
        .quickcheck(prop_idempotent as fn(PolyString) -> TestResult);
}

#[test]
fn test_variables_survive_printing() {
    fn prop_same_variables(input: ExprString) -> bool {
        let cas = Cas::new();
        let Ok(parsed) = cas.parse(&input.0) else {
            return false;
        };
        let printed = cas.to_plain_text(&parsed);
        cas.parse(&printed)
            .map(|reparsed| cas.enumerate_variables(&reparsed) == cas.enumerate_variables(&parsed))
            .unwrap_or(false)
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop_same_variables as fn(ExprString) -> bool);
}
