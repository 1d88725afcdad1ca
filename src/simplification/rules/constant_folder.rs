use std::sync::Arc;

use super::Pass;
use crate::ast::{BinaryOperator, NAryOperator};
use crate::simplification::helpers::{lcm, reduce_fraction};
use crate::visitor::Transform;
use crate::Expr;

/// Exact arithmetic on integer constants and constant fractions.
///
/// Any `i64` overflow leaves the node as it was.
pub(crate) struct ConstantFolder;

impl ConstantFolder {
    fn fold_division(numerator: Expr, denominator: Expr) -> Expr {
        if let (Some(n), Some(d)) = (numerator.as_constant(), denominator.as_constant())
            && d != 0
            && let Some((n, d)) = reduce_fraction(n, d)
        {
            return Expr::rational(n, d);
        }
        Expr::division(numerator, denominator)
    }

    fn fold_product(operands: Vec<Expr>) -> Expr {
        let mut coefficient = Some(1i64);
        let mut factors = Vec::with_capacity(operands.len());
        for operand in &operands {
            match operand.as_constant() {
                Some(value) => coefficient = coefficient.and_then(|c| c.checked_mul(value)),
                None => factors.push(operand.clone()),
            }
        }
        let Some(coefficient) = coefficient else {
            return Expr::nary(NAryOperator::Product, operands);
        };
        if coefficient == 0 {
            return Expr::constant(0);
        }
        if coefficient != 1 || factors.is_empty() {
            factors.push(Expr::constant(coefficient));
        }
        Expr::implode(NAryOperator::Product, factors)
    }

    fn fold_sum(operands: Vec<Expr>) -> Expr {
        // a zero denominator keeps the whole sum unfolded
        if operands
            .iter()
            .any(|o| matches!(o.as_rational(), Some((_, 0))))
        {
            return Expr::nary(NAryOperator::Addition, operands);
        }
        let mut fractions = Vec::new();
        let mut rest = Vec::with_capacity(operands.len());
        for operand in &operands {
            match operand.as_rational() {
                Some(fraction) => fractions.push(fraction),
                None => rest.push(operand.clone()),
            }
        }
        if fractions.is_empty() {
            return Expr::nary(NAryOperator::Addition, operands);
        }
        match Self::sum_fractions(&fractions) {
            Some((numerator, denominator)) => {
                if numerator != 0 {
                    rest.push(Expr::rational(numerator, denominator));
                }
                Expr::implode(NAryOperator::Addition, rest)
            }
            None => Expr::nary(NAryOperator::Addition, operands),
        }
    }

    /// Sum over the least common denominator; `None` on overflow
    fn sum_fractions(fractions: &[(i64, i64)]) -> Option<(i64, i64)> {
        let denominator = fractions
            .iter()
            .try_fold(1i64, |acc, &(_, d)| lcm(acc, d))?;
        let numerator = fractions.iter().try_fold(0i64, |acc, &(n, d)| {
            n.checked_mul(denominator / d)
                .and_then(|scaled| acc.checked_add(scaled))
        })?;
        reduce_fraction(numerator, denominator)
    }
}

impl Transform for ConstantFolder {
    fn visit_binary(&mut self, op: BinaryOperator, left: &Expr, right: &Expr) -> Expr {
        let left = self.transform(left);
        let right = self.transform(right);
        match op {
            BinaryOperator::Division => Self::fold_division(left, right),
            BinaryOperator::Power => Expr::power(left, right),
        }
    }

    fn visit_nary(&mut self, op: NAryOperator, operands: &[Arc<Expr>]) -> Expr {
        let operands = self.transform_all(operands);
        match op {
            NAryOperator::Product => Self::fold_product(operands),
            NAryOperator::Addition => Self::fold_sum(operands),
        }
    }
}

impl Pass for ConstantFolder {
    fn name(&self) -> &'static str {
        "constant-folder"
    }

    fn apply(&self, expr: &Expr) -> Expr {
        ConstantFolder.transform(expr)
    }
}
