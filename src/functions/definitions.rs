//! Mathematical function definitions for the function registry
//!
//! Contains numeric evaluation, the outer derivative `f'(u)` and the LaTeX
//! form of every built-in function. The chain factor `u'` is applied by the
//! differentiator.

use super::registry::{FunctionDefinition, LatexForm};
use super::{Function, func, neg, recip};
use crate::Expr;

fn one_minus_square(u: &Expr) -> Expr {
    Expr::subtract(
        Expr::constant(1),
        Expr::power(u.clone(), Expr::constant(2)),
    )
}

/// Return all function definitions for populating the registry,
/// in `Function` discriminant order
pub(crate) fn all_definitions() -> Vec<FunctionDefinition> {
    vec![
        // Trigonometric
        FunctionDefinition {
            function: Function::Sin,
            aliases: &[],
            latex: LatexForm::Command("\\sin"),
            eval: f64::sin,
            // d/du sin(u) = cos(u)
            derivative: |u| func(Function::Cos, u.clone()),
        },
        FunctionDefinition {
            function: Function::Cos,
            aliases: &[],
            latex: LatexForm::Command("\\cos"),
            eval: f64::cos,
            // d/du cos(u) = -sin(u)
            derivative: |u| neg(func(Function::Sin, u.clone())),
        },
        FunctionDefinition {
            function: Function::Tan,
            aliases: &[],
            latex: LatexForm::Command("\\tan"),
            eval: f64::tan,
            // d/du tan(u) = 1/cos(u)^2
            derivative: |u| {
                recip(Expr::power(
                    func(Function::Cos, u.clone()),
                    Expr::constant(2),
                ))
            },
        },
        // Inverse trigonometric
        FunctionDefinition {
            function: Function::Asin,
            aliases: &["arcsin"],
            latex: LatexForm::Command("\\arcsin"),
            eval: f64::asin,
            // d/du asin(u) = 1/sqrt(1 - u^2)
            derivative: |u| recip(func(Function::Sqrt, one_minus_square(u))),
        },
        FunctionDefinition {
            function: Function::Acos,
            aliases: &["arccos"],
            latex: LatexForm::Command("\\arccos"),
            eval: f64::acos,
            // d/du acos(u) = -1/sqrt(1 - u^2)
            derivative: |u| neg(recip(func(Function::Sqrt, one_minus_square(u)))),
        },
        FunctionDefinition {
            function: Function::Atan,
            aliases: &["arctan"],
            latex: LatexForm::Command("\\arctan"),
            eval: f64::atan,
            // d/du atan(u) = 1/(1 + u^2)
            derivative: |u| {
                recip(Expr::sum(vec![
                    Expr::constant(1),
                    Expr::power(u.clone(), Expr::constant(2)),
                ]))
            },
        },
        // Logarithmic, absolute value, roots
        FunctionDefinition {
            function: Function::Ln,
            aliases: &[],
            latex: LatexForm::Command("\\ln"),
            eval: f64::ln,
            derivative: |u| recip(u.clone()),
        },
        FunctionDefinition {
            function: Function::Abs,
            aliases: &[],
            latex: LatexForm::Bars,
            eval: f64::abs,
            // d/du |u| = |u|/u
            derivative: |u| Expr::division(func(Function::Abs, u.clone()), u.clone()),
        },
        FunctionDefinition {
            function: Function::Sqrt,
            aliases: &[],
            latex: LatexForm::Radical,
            eval: f64::sqrt,
            // d/du sqrt(u) = 1/(2*sqrt(u))
            derivative: |u| {
                recip(Expr::product(vec![
                    Expr::constant(2),
                    func(Function::Sqrt, u.clone()),
                ]))
            },
        },
    ]
}
