//! Canonical operand ordering
//!
//! Order: constants (by value) < variables (by name) < n-ary < binary <
//! functions < equations. Nodes of the same rank compare structurally, so
//! the order is total and two trees differing only in operand order sort to
//! the same tree.

use std::cmp::Ordering as CmpOrdering;
use std::sync::Arc;

use super::Pass;
use crate::ast::NAryOperator;
use crate::visitor::Transform;
use crate::{Expr, ExprKind};

pub(crate) struct TreeSorter;

fn rank(expr: &Expr) -> u8 {
    match expr.kind() {
        ExprKind::Constant(_) => 0,
        ExprKind::Variable(_) => 1,
        ExprKind::NAry { .. } => 2,
        ExprKind::Binary { .. } => 3,
        ExprKind::Function { .. } => 4,
        ExprKind::Equation { .. } => 5,
    }
}

fn cmp_operands(a: &[Arc<Expr>], b: &[Arc<Expr>]) -> CmpOrdering {
    for (x, y) in a.iter().zip(b) {
        match expr_cmp(x, y) {
            CmpOrdering::Equal => {}
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Total order on expressions used to sort n-ary operands
pub(crate) fn expr_cmp(a: &Expr, b: &Expr) -> CmpOrdering {
    use ExprKind::{Binary, Constant, Equation, Function, NAry, Variable};
    match (a.kind(), b.kind()) {
        (Constant(x), Constant(y)) => x.cmp(y),
        (Variable(x), Variable(y)) => x.cmp(y),
        (NAry { op: o1, operands: t1 }, NAry { op: o2, operands: t2 }) => {
            o1.cmp(o2).then_with(|| cmp_operands(t1, t2))
        }
        (
            Binary {
                op: o1,
                left: l1,
                right: r1,
            },
            Binary {
                op: o2,
                left: l2,
                right: r2,
            },
        ) => o1
            .cmp(o2)
            .then_with(|| expr_cmp(l1, l2))
            .then_with(|| expr_cmp(r1, r2)),
        (
            Function {
                function: f1,
                argument: a1,
            },
            Function {
                function: f2,
                argument: a2,
            },
        ) => f1.cmp(f2).then_with(|| expr_cmp(a1, a2)),
        (Equation { lhs: l1, rhs: r1 }, Equation { lhs: l2, rhs: r2 }) => {
            expr_cmp(l1, l2).then_with(|| expr_cmp(r1, r2))
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

impl Transform for TreeSorter {
    fn visit_nary(&mut self, op: NAryOperator, operands: &[Arc<Expr>]) -> Expr {
        let mut operands = self.transform_all(operands);
        operands.sort_by(expr_cmp);
        Expr::nary(op, operands)
    }
}

impl Pass for TreeSorter {
    fn name(&self) -> &'static str {
        "sorter"
    }

    fn apply(&self, expr: &Expr) -> Expr {
        TreeSorter.transform(expr)
    }
}
