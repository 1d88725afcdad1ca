// Differentiation engine - applies calculus rules
//
// The output is raw (`3*x^2*1`, `0*y + x*1`, ...); the facade simplifies both
// the input and the result. Only unit chain factors are dropped here.

use std::sync::Arc;

use crate::ast::{BinaryOperator, NAryOperator};
use crate::functions::{Function, Registry, mul_opt};
use crate::visitor::Transform;
use crate::Expr;

/// Symbolic derivative with respect to one variable
pub(crate) struct Differentiator<'a> {
    variable: &'a str,
    registry: &'a Registry,
}

impl<'a> Differentiator<'a> {
    pub fn new(variable: &'a str, registry: &'a Registry) -> Self {
        Differentiator { variable, registry }
    }

    pub fn derive(&mut self, expr: &Expr) -> Expr {
        self.transform(expr)
    }

    /// d/dx f^g
    fn derive_power(&mut self, base: &Expr, exponent: &Expr) -> Expr {
        let base_prime = self.transform(base);

        match exponent.as_rational() {
            // c * f^(c-1) * f'
            Some((c, 1)) => {
                let reduced = c
                    .checked_sub(1)
                    .map(Expr::constant)
                    .unwrap_or_else(|| Expr::sum(vec![exponent.clone(), Expr::constant(-1)]));
                Expr::product(vec![
                    Expr::constant(c),
                    Expr::power(base.clone(), reduced),
                    base_prime,
                ])
            }
            // same rule for an exact fraction, the folder computes g - 1
            Some(_) => Expr::product(vec![
                exponent.clone(),
                Expr::power(
                    base.clone(),
                    Expr::sum(vec![exponent.clone(), Expr::constant(-1)]),
                ),
                base_prime,
            ]),
            // f^g * (g * ln(f))'
            None => {
                let log_form = Expr::product(vec![
                    exponent.clone(),
                    Expr::function(Function::Ln, base.clone()),
                ]);
                Expr::product(vec![
                    Expr::power(base.clone(), exponent.clone()),
                    self.transform(&log_form),
                ])
            }
        }
    }

    /// (f'g - fg') / g^2
    fn derive_quotient(&mut self, numerator: &Expr, denominator: &Expr) -> Expr {
        let numerator_prime = self.transform(numerator);
        let denominator_prime = self.transform(denominator);
        Expr::division(
            Expr::subtract(
                Expr::product(vec![numerator_prime, denominator.clone()]),
                Expr::product(vec![numerator.clone(), denominator_prime]),
            ),
            Expr::power(denominator.clone(), Expr::constant(2)),
        )
    }

    /// Sum over i of the product with factor i replaced by its derivative
    fn derive_product(&mut self, factors: &[Arc<Expr>]) -> Expr {
        let terms = (0..factors.len())
            .map(|i| {
                let term = factors
                    .iter()
                    .enumerate()
                    .map(|(j, factor)| {
                        if i == j {
                            self.transform(factor)
                        } else {
                            Expr::clone(factor)
                        }
                    })
                    .collect();
                Expr::product(term)
            })
            .collect();
        Expr::implode(NAryOperator::Addition, terms)
    }
}

impl Transform for Differentiator<'_> {
    fn visit_variable(&mut self, _expr: &Expr, name: &str) -> Expr {
        Expr::constant(i64::from(name == self.variable))
    }

    fn visit_constant(&mut self, _expr: &Expr, _value: i64) -> Expr {
        Expr::constant(0)
    }

    fn visit_binary(&mut self, op: BinaryOperator, left: &Expr, right: &Expr) -> Expr {
        match op {
            BinaryOperator::Division => self.derive_quotient(left, right),
            BinaryOperator::Power => self.derive_power(left, right),
        }
    }

    fn visit_nary(&mut self, op: NAryOperator, operands: &[Arc<Expr>]) -> Expr {
        match op {
            NAryOperator::Addition => Expr::nary(op, self.transform_all(operands)),
            NAryOperator::Product => self.derive_product(operands),
        }
    }

    /// Chain rule: f'(u) * u'
    fn visit_function(&mut self, function: Function, argument: &Expr) -> Expr {
        let outer = (self.registry.definition(function).derivative)(argument);
        let inner = self.transform(argument);
        mul_opt(outer, inner)
    }
}
