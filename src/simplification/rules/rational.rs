use std::sync::Arc;

use super::Pass;
use crate::ast::{BinaryOperator, NAryOperator};
use crate::visitor::Transform;
use crate::{Expr, ExprKind};

/// Moves divisions outward so that at most one fraction bar remains per
/// product or quotient.
pub(crate) struct RationalSimplifier;

fn as_division(expr: &Expr) -> Option<(&Expr, &Expr)> {
    match expr.kind() {
        ExprKind::Binary {
            op: BinaryOperator::Division,
            left,
            right,
        } => Some((&**left, &**right)),
        _ => None,
    }
}

impl Transform for RationalSimplifier {
    fn visit_binary(&mut self, op: BinaryOperator, left: &Expr, right: &Expr) -> Expr {
        let left = self.transform(left);
        let right = self.transform(right);
        if op == BinaryOperator::Division {
            // (a/b)/c = a/(b*c)
            if let Some((a, b)) = as_division(&left) {
                return Expr::division(a.clone(), Expr::product(vec![b.clone(), right]));
            }
            // a/(b/c) = (a*c)/b
            if let Some((b, c)) = as_division(&right) {
                return Expr::division(Expr::product(vec![left, c.clone()]), b.clone());
            }
        }
        Expr::binary(op, left, right)
    }

    fn visit_nary(&mut self, op: NAryOperator, operands: &[Arc<Expr>]) -> Expr {
        let operands = self.transform_all(operands);
        if op != NAryOperator::Product || !operands.iter().any(|o| as_division(o).is_some()) {
            return Expr::nary(op, operands);
        }

        // a * (b/c) * (d/e) = (a*b*d) / (c*e)
        let mut numerators = Vec::with_capacity(operands.len());
        let mut denominators = Vec::new();
        for operand in operands {
            match as_division(&operand) {
                Some((n, d)) => {
                    numerators.push(n.clone());
                    denominators.push(d.clone());
                }
                None => numerators.push(operand),
            }
        }
        Expr::division(
            Expr::implode(NAryOperator::Product, numerators),
            Expr::implode(NAryOperator::Product, denominators),
        )
    }
}

impl Pass for RationalSimplifier {
    fn name(&self) -> &'static str {
        "rational"
    }

    fn apply(&self, expr: &Expr) -> Expr {
        RationalSimplifier.transform(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplification::rules::test_support::p;

    fn apply(input: &str) -> String {
        RationalSimplifier.transform(&p(input)).to_string()
    }

    #[test]
    fn test_nested_numerator_division() {
        assert_eq!(apply("(a/b)/c"), "a/(b*c)");
    }

    #[test]
    fn test_nested_denominator_division() {
        assert_eq!(apply("a/(b/c)"), "(a*c)/b");
    }

    #[test]
    fn test_product_of_fractions() {
        assert_eq!(apply("x*(1/2)"), "(x*1)/2");
        let expr = RationalSimplifier.transform(&Expr::product(vec![
            Expr::variable("a"),
            Expr::division(Expr::variable("b"), Expr::variable("c")),
            Expr::division(Expr::variable("d"), Expr::variable("e")),
        ]));
        assert_eq!(expr.to_string(), "(a*b*d)/(c*e)");
    }

    #[test]
    fn test_plain_product_untouched() {
        assert_eq!(apply("a*b"), "a*b");
    }
}
