//! Expression visitor pattern for AST traversal
//!
//! Two flavours:
//! - [`ExprVisitor`] with [`walk_expr`] for read-only pre-order walks
//! - [`Transform`] for passes that rebuild the tree. Every hook has a default
//!   that rebuilds the node from its transformed children, so a pass only
//!   overrides the variants it rewrites.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::ast::{BinaryOperator, NAryOperator};
use crate::functions::{Function, Registry};
use crate::{Expr, ExprKind};

/// Trait for visiting expression nodes in the AST
///
/// Each method returns a boolean indicating whether to continue visiting children.
pub trait ExprVisitor {
    fn visit_variable(&mut self, _name: &str) -> bool {
        true
    }

    fn visit_constant(&mut self, _value: i64) -> bool {
        true
    }

    fn visit_binary(&mut self, _op: BinaryOperator, _left: &Expr, _right: &Expr) -> bool {
        true
    }

    fn visit_nary(&mut self, _op: NAryOperator, _operands: &[Arc<Expr>]) -> bool {
        true
    }

    fn visit_function(&mut self, _function: Function, _argument: &Expr) -> bool {
        true
    }

    fn visit_equation(&mut self, _lhs: &Expr, _rhs: &Expr) -> bool {
        true
    }
}

/// Walk an expression tree with a visitor
///
/// Visits nodes in pre-order (parent before children).
pub fn walk_expr<V: ExprVisitor>(expr: &Expr, visitor: &mut V) {
    match expr.kind() {
        ExprKind::Variable(name) => {
            visitor.visit_variable(name);
        }
        ExprKind::Constant(value) => {
            visitor.visit_constant(*value);
        }
        ExprKind::Binary { op, left, right } => {
            if visitor.visit_binary(*op, left, right) {
                walk_expr(left, visitor);
                walk_expr(right, visitor);
            }
        }
        ExprKind::NAry { op, operands } => {
            if visitor.visit_nary(*op, operands) {
                for operand in operands {
                    walk_expr(operand, visitor);
                }
            }
        }
        ExprKind::Function { function, argument } => {
            if visitor.visit_function(*function, argument) {
                walk_expr(argument, visitor);
            }
        }
        ExprKind::Equation { lhs, rhs } => {
            if visitor.visit_equation(lhs, rhs) {
                walk_expr(lhs, visitor);
                walk_expr(rhs, visitor);
            }
        }
    }
}

/// A visitor that collects free variable names, skipping named constants
pub struct VariableCollector<'a> {
    registry: &'a Registry,
    pub variables: BTreeSet<String>,
}

impl<'a> VariableCollector<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        VariableCollector {
            registry,
            variables: BTreeSet::new(),
        }
    }
}

impl ExprVisitor for VariableCollector<'_> {
    fn visit_variable(&mut self, name: &str) -> bool {
        if !self.registry.is_constant(name) && !self.variables.contains(name) {
            self.variables.insert(name.to_string());
        }
        true
    }
}

/// Rebuilding traversal used by every simplification pass, the
/// differentiator and the substitutor.
pub trait Transform {
    fn transform(&mut self, expr: &Expr) -> Expr {
        match expr.kind() {
            ExprKind::Variable(name) => self.visit_variable(expr, name),
            ExprKind::Constant(value) => self.visit_constant(expr, *value),
            ExprKind::Binary { op, left, right } => self.visit_binary(*op, left, right),
            ExprKind::NAry { op, operands } => self.visit_nary(*op, operands),
            ExprKind::Function { function, argument } => {
                self.visit_function(*function, argument)
            }
            ExprKind::Equation { lhs, rhs } => self.visit_equation(lhs, rhs),
        }
    }

    fn visit_variable(&mut self, expr: &Expr, _name: &str) -> Expr {
        expr.clone()
    }

    fn visit_constant(&mut self, expr: &Expr, _value: i64) -> Expr {
        expr.clone()
    }

    fn visit_binary(&mut self, op: BinaryOperator, left: &Expr, right: &Expr) -> Expr {
        let left = self.transform(left);
        let right = self.transform(right);
        Expr::binary(op, left, right)
    }

    fn visit_nary(&mut self, op: NAryOperator, operands: &[Arc<Expr>]) -> Expr {
        let operands = self.transform_all(operands);
        Expr::nary(op, operands)
    }

    fn visit_function(&mut self, function: Function, argument: &Expr) -> Expr {
        let argument = self.transform(argument);
        Expr::function(function, argument)
    }

    fn visit_equation(&mut self, lhs: &Expr, rhs: &Expr) -> Expr {
        let lhs = self.transform(lhs);
        let rhs = self.transform(rhs);
        Expr::equation(lhs, rhs)
    }

    fn transform_all(&mut self, operands: &[Arc<Expr>]) -> Vec<Expr> {
        operands.iter().map(|o| self.transform(o)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_variable_collector_skips_constants() {
        let registry = Registry::standard();
        let expr = parse("ln(x) + test + x*cos(y) + pi*e", registry).unwrap();
        let mut collector = VariableCollector::new(registry);
        walk_expr(&expr, &mut collector);
        let names: Vec<_> = collector.variables.iter().map(String::as_str).collect();
        assert_eq!(names, ["test", "x", "y"]);
    }

    #[derive(Default)]
    struct ConstantCounter {
        count: usize,
    }

    impl ExprVisitor for ConstantCounter {
        fn visit_constant(&mut self, _value: i64) -> bool {
            self.count += 1;
            true
        }

        fn visit_function(&mut self, _function: Function, _argument: &Expr) -> bool {
            // do not descend into function arguments
            false
        }
    }

    #[test]
    fn test_visitor_can_prune() {
        let expr = parse("2x + sin(3x) + 4", Registry::standard()).unwrap();
        let mut counter = ConstantCounter::default();
        walk_expr(&expr, &mut counter);
        assert_eq!(counter.count, 2);
    }

    /// Swaps every constant for its successor
    struct Increment;

    impl Transform for Increment {
        fn visit_constant(&mut self, _expr: &Expr, value: i64) -> Expr {
            Expr::constant(value + 1)
        }
    }

    #[test]
    fn test_transform_rebuilds_untouched_nodes() {
        let registry = Registry::standard();
        let expr = parse("x^2 + sin(3)", registry).unwrap();
        let expected = parse("x^3 + sin(4)", registry).unwrap();
        assert_eq!(Increment.transform(&expr), expected);
    }
}
