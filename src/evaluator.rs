//! Floating-point evaluation of expression trees
//!
//! Plain IEEE-754 semantics: division by zero gives an infinity, `ln(-1)` a
//! NaN, and so on. Every operand is evaluated, there is no short-circuit on
//! a zero factor.

use rustc_hash::FxHashMap;

use crate::ast::{BinaryOperator, NAryOperator};
use crate::error::EvaluationError;
use crate::functions::Registry;
use crate::{Expr, ExprKind};

/// Variable bindings plus the registry's named constants.
///
/// Constants are inserted last, so a user binding named `pi` or `e` is
/// shadowed by the real value.
pub(crate) struct Evaluator<'a> {
    registry: &'a Registry,
    bindings: FxHashMap<String, f64>,
}

impl<'a> Evaluator<'a> {
    pub fn new<'v>(registry: &'a Registry, values: impl IntoIterator<Item = (&'v str, f64)>) -> Self {
        let mut bindings: FxHashMap<String, f64> = values
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        bindings.extend(
            registry
                .constant_values()
                .map(|(name, value)| (name.to_string(), value)),
        );
        Evaluator { registry, bindings }
    }

    /// Bind or rebind one variable. Named constants cannot be rebound.
    pub fn bind(&mut self, name: &str, value: f64) {
        if self.registry.is_constant(name) {
            return;
        }
        match self.bindings.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.bindings.insert(name.to_string(), value);
            }
        }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<f64, EvaluationError> {
        match expr.kind() {
            ExprKind::Constant(value) => Ok(*value as f64),
            ExprKind::Variable(name) => self
                .bindings
                .get(name.as_ref())
                .copied()
                .ok_or_else(|| EvaluationError::UnboundVariable(name.to_string())),
            ExprKind::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(match op {
                    BinaryOperator::Division => left / right,
                    BinaryOperator::Power => left.powf(right),
                })
            }
            ExprKind::NAry { op, operands } => {
                let values = operands.iter().map(|o| self.evaluate(o));
                match op {
                    NAryOperator::Addition => values.sum(),
                    NAryOperator::Product => values.product(),
                }
            }
            ExprKind::Function { function, argument } => {
                let argument = self.evaluate(argument)?;
                Ok((self.registry.definition(*function).eval)(argument))
            }
            ExprKind::Equation { .. } => Err(EvaluationError::Equation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn eval(input: &str, values: &[(&str, f64)]) -> Result<f64, EvaluationError> {
        let registry = Registry::standard();
        let expr = parse(input, registry).unwrap();
        Evaluator::new(registry, values.iter().copied()).evaluate(&expr)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("3 * (5 + 2)^2 * 3", &[]), Ok(441.0));
        assert_eq!(eval("2^3^2", &[]), Ok(512.0));
        assert_eq!(eval("(2^3)^2", &[]), Ok(64.0));
        assert_eq!(eval("x^2 + 2x + 1", &[("x", 10.0)]), Ok(121.0));
        assert_eq!(eval("1.5 * 4", &[]), Ok(6.0));
    }

    #[test]
    fn test_constants_shadow_bindings() {
        let value = eval("pi", &[("pi", 3.0)]).unwrap();
        assert!((value - std::f64::consts::PI).abs() < 1e-15);
        let value = eval("5x ln(e)", &[("x", 10.0)]).unwrap();
        assert!((value - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_ieee_semantics() {
        assert_eq!(eval("1/0", &[]), Ok(f64::INFINITY));
        assert!(eval("ln(0 - 1)", &[]).unwrap().is_nan());
        // no short-circuit on a zero factor
        assert!(eval("0 * (1/0)", &[]).unwrap().is_nan());
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            eval("x + y", &[("x", 1.0)]),
            Err(EvaluationError::UnboundVariable("y".into()))
        );
        assert_eq!(eval("x = 1", &[("x", 1.0)]), Err(EvaluationError::Equation));
    }

    #[test]
    fn test_rebinding() {
        let registry = Registry::standard();
        let expr = parse("x*y", registry).unwrap();
        let mut evaluator = Evaluator::new(registry, [("y", 2.0)]);
        evaluator.bind("x", 3.0);
        assert_eq!(evaluator.evaluate(&expr), Ok(6.0));
        evaluator.bind("x", 4.0);
        assert_eq!(evaluator.evaluate(&expr), Ok(8.0));
        evaluator.bind("e", 0.0);
        assert_eq!(
            evaluator.evaluate(&parse("e", registry).unwrap()),
            Ok(std::f64::consts::E)
        );
    }
}
