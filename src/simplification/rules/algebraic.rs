use std::sync::Arc;

use super::Pass;
use crate::ast::{BinaryOperator, NAryOperator};
use crate::functions::{Function, SpecialConstant};
use crate::simplification::helpers::{exact_sqrt, integer_power};
use crate::visitor::Transform;
use crate::Expr;

/// Identity rules on divisions, powers, products and function values at
/// special points. Applied bottom-up.
pub(crate) struct AlgebraicSimplifier;

impl AlgebraicSimplifier {
    fn division(numerator: Expr, denominator: Expr) -> Expr {
        // x/1 = x
        if denominator.is_constant(1) {
            return numerator;
        }
        let nonzero_denominator = !denominator.is_constant(0);
        // 0/x = 0
        if numerator.is_constant(0) && nonzero_denominator {
            return Expr::constant(0);
        }
        // x/x = 1
        if numerator == denominator && nonzero_denominator {
            return Expr::constant(1);
        }
        Expr::division(numerator, denominator)
    }

    fn power(base: Expr, exponent: Expr) -> Expr {
        // x^0 = 1, x^1 = x, 1^x = 1
        if exponent.is_constant(0) || base.is_constant(1) {
            return Expr::constant(1);
        }
        if exponent.is_constant(1) {
            return base;
        }
        if let (Some(b), Some(e)) = (base.as_constant(), exponent.as_constant()) {
            if e >= 0 {
                if let Some(value) = integer_power(b, e) {
                    return Expr::constant(value);
                }
            } else if let Some(value) = e.checked_neg().and_then(|abs| integer_power(b, abs)) {
                return Expr::division(Expr::constant(1), Expr::constant(value));
            }
        }
        Expr::power(base, exponent)
    }

    fn function(function: Function, argument: Expr) -> Expr {
        let folded = match (function, argument.as_constant()) {
            (Function::Sin | Function::Tan | Function::Asin | Function::Atan, Some(0)) => Some(0),
            (Function::Cos, Some(0)) => Some(1),
            (Function::Acos | Function::Ln, Some(1)) => Some(0),
            (Function::Abs, Some(c)) => c.checked_abs(),
            (Function::Sqrt, Some(c)) => exact_sqrt(c),
            (Function::Ln, None) if argument.as_variable() == Some(SpecialConstant::E.name()) => {
                Some(1)
            }
            _ => None,
        };
        match folded {
            Some(value) => Expr::constant(value),
            None => Expr::function(function, argument),
        }
    }
}

impl Transform for AlgebraicSimplifier {
    fn visit_binary(&mut self, op: BinaryOperator, left: &Expr, right: &Expr) -> Expr {
        let left = self.transform(left);
        let right = self.transform(right);
        match op {
            BinaryOperator::Division => Self::division(left, right),
            BinaryOperator::Power => Self::power(left, right),
        }
    }

    fn visit_nary(&mut self, op: NAryOperator, operands: &[Arc<Expr>]) -> Expr {
        let operands = self.transform_all(operands);
        // 0 * x = 0
        if op == NAryOperator::Product && operands.iter().any(|o| o.is_constant(0)) {
            return Expr::constant(0);
        }
        Expr::nary(op, operands)
    }

    fn visit_function(&mut self, function: Function, argument: &Expr) -> Expr {
        let argument = self.transform(argument);
        Self::function(function, argument)
    }
}

impl Pass for AlgebraicSimplifier {
    fn name(&self) -> &'static str {
        "algebraic"
    }

    fn apply(&self, expr: &Expr) -> Expr {
        AlgebraicSimplifier.transform(expr)
    }
}
