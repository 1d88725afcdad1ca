use super::Pass;
use crate::{Expr, ExprKind};

/// Flattens nested n-ary nodes of the same operator:
/// `a + (b + c)` becomes `a + b + c`.
///
/// The parser nests chains like `x + x + ... + x` one level per operator,
/// so this pass walks the tree with an explicit stack instead of recursing.
/// Every later pass then sees the flattened, shallow tree.
pub(crate) struct Leveler;

enum Frame<'a> {
    Enter(&'a Expr),
    /// All children of the node are leveled and on the output stack
    Exit(&'a Expr, usize),
}

fn children(expr: &Expr) -> Vec<&Expr> {
    match expr.kind() {
        ExprKind::Variable(_) | ExprKind::Constant(_) => Vec::new(),
        ExprKind::Binary { left, right, .. } => vec![&**left, &**right],
        ExprKind::NAry { operands, .. } => operands.iter().map(|o| &**o).collect(),
        ExprKind::Function { argument, .. } => vec![&**argument],
        ExprKind::Equation { lhs, rhs } => vec![&**lhs, &**rhs],
    }
}

/// Rebuild `expr` over its leveled children
fn rebuild(expr: &Expr, children: Vec<Expr>) -> Expr {
    match expr.kind() {
        ExprKind::Variable(_) | ExprKind::Constant(_) => expr.clone(),
        ExprKind::Binary { op, .. } => match <[Expr; 2]>::try_from(children) {
            Ok([left, right]) => Expr::binary(*op, left, right),
            Err(_) => expr.clone(),
        },
        ExprKind::NAry { op, .. } => {
            let mut leveled = Vec::with_capacity(children.len());
            for child in children {
                match child.kind() {
                    ExprKind::NAry {
                        op: inner,
                        operands: nested,
                    } if inner == op => leveled.extend(nested.iter().map(|o| Expr::clone(o))),
                    _ => leveled.push(child),
                }
            }
            Expr::nary(*op, leveled)
        }
        ExprKind::Function { function, .. } => match <[Expr; 1]>::try_from(children) {
            Ok([argument]) => Expr::function(*function, argument),
            Err(_) => expr.clone(),
        },
        ExprKind::Equation { .. } => match <[Expr; 2]>::try_from(children) {
            Ok([lhs, rhs]) => Expr::equation(lhs, rhs),
            Err(_) => expr.clone(),
        },
    }
}

impl Leveler {
    fn level(expr: &Expr) -> Expr {
        let mut pending = vec![Frame::Enter(expr)];
        let mut done: Vec<Expr> = Vec::new();

        while let Some(frame) = pending.pop() {
            match frame {
                Frame::Enter(node) => {
                    let kids = children(node);
                    pending.push(Frame::Exit(node, kids.len()));
                    pending.extend(kids.into_iter().rev().map(Frame::Enter));
                }
                Frame::Exit(node, count) => {
                    let leveled = done.split_off(done.len() - count);
                    done.push(rebuild(node, leveled));
                }
            }
        }
        done.pop().unwrap_or_else(|| expr.clone())
    }
}

impl Pass for Leveler {
    fn name(&self) -> &'static str {
        "leveler"
    }

    fn apply(&self, expr: &Expr) -> Expr {
        Leveler::level(expr)
    }
}
