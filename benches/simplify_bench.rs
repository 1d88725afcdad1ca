//! Simplifier Benchmark
//!
//! Parsing, simplification, differentiation and the numeric algorithms on
//! a mixed expression of N terms.

use criterion::{Criterion, criterion_group, criterion_main};
use converger::Cas;
use std::collections::HashMap;
use std::fmt::Write;
use std::hint::black_box;

// =============================================================================
// Expression Generator
// =============================================================================

/// Mixed expression with N terms: polynomials, trig, logarithms, fractions
fn generate_mixed(n: usize) -> String {
    let mut s = String::with_capacity(n * 24);
    for i in 1..=n {
        if i > 1 {
            s.push_str(if i % 3 == 1 { " - " } else { " + " });
        }
        match i % 4 {
            0 => write!(s, "{}*x^{}", i, i % 10 + 1),
            1 => write!(s, "sin({}*x)*cos(x)", i),
            2 => write!(s, "ln(x + {})", i),
            _ => write!(s, "(x^2 + {})/(x + {})", i, i),
        }
        .unwrap();
    }
    s
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_expressions_50");
    group.sample_size(20);

    let cas = Cas::new();
    let mixed_str = generate_mixed(50);
    let mixed_expr = cas.parse(&mixed_str).unwrap();

    group.bench_function("parse", |b| b.iter(|| cas.parse(black_box(&mixed_str))));

    group.bench_function("simplify", |b| {
        b.iter(|| cas.simplify(black_box(&mixed_expr)))
    });

    group.bench_function("differentiate", |b| {
        b.iter(|| cas.differentiate(black_box(&mixed_expr), "x"))
    });

    let derivative = cas.differentiate(&mixed_expr, "x").unwrap();
    let at = HashMap::from([("x", 1.5)]);
    group.bench_function("evaluate_derivative", |b| {
        b.iter(|| cas.evaluate(black_box(&derivative), &at))
    });

    group.finish();
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric_algorithms");
    group.sample_size(10);

    let cas = Cas::new();
    let cubic = cas.parse("x^3 + 2x^2 - 3x - 5 = 0").unwrap();
    group.bench_function("solve_cubic", |b| {
        b.iter(|| cas.solve_numerically(black_box(&cubic)))
    });

    let bell = cas.parse("x*e^(-x^2)").unwrap();
    group.bench_function("integrate_bell", |b| {
        b.iter(|| cas.integrate_numerically(black_box(&bell), 0.0, 1.0))
    });

    let sine = cas.parse("sin(x)").unwrap();
    let origin = cas.parse("0").unwrap();
    group.bench_function("taylor_sin_7", |b| {
        b.iter(|| cas.taylor_series(black_box(&sine), "x", &origin, 7))
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_algorithms);
criterion_main!(benches);
