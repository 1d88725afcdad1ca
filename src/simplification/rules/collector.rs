use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::Pass;
use crate::ast::{BinaryOperator, NAryOperator};
use crate::visitor::Transform;
use crate::{Expr, ExprKind};

/// Combines like terms:
/// - products group factors by base and sum their exponents
///   (`x * x^2 = x^(1+2)`)
/// - sums group addends by term and sum their coefficients
///   (`2x + 3x = (2+3)x`)
///
/// The coefficient sums are left for the constant folder.
pub(crate) struct Collector;

/// Groups values under structurally equal keys, keeping first-seen key order
struct Groups {
    index: FxHashMap<Expr, usize>,
    entries: Vec<(Expr, Vec<Expr>)>,
}

impl Groups {
    fn with_capacity(capacity: usize) -> Self {
        Groups {
            index: FxHashMap::default(),
            entries: Vec::with_capacity(capacity),
        }
    }

    fn add(&mut self, key: Expr, value: Expr) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    /// Rebuild one operand per key; a key seen once with a unit value is
    /// emitted bare
    fn rebuild(self, combine: impl Fn(Expr, Expr) -> Expr) -> Vec<Expr> {
        self.entries
            .into_iter()
            .map(|(key, values)| {
                if values.len() == 1 && values[0].is_constant(1) {
                    key
                } else {
                    combine(key, Expr::implode(NAryOperator::Addition, values))
                }
            })
            .collect()
    }
}

fn base_and_exponent(factor: Expr) -> (Expr, Expr) {
    match factor.kind() {
        ExprKind::Binary {
            op: BinaryOperator::Power,
            left,
            right,
        } => (Expr::clone(left), Expr::clone(right)),
        _ => (factor, Expr::constant(1)),
    }
}

/// A two-factor product reads as `coefficient * term`
fn term_and_coefficient(addend: Expr) -> (Expr, Expr) {
    match addend.kind() {
        ExprKind::NAry {
            op: NAryOperator::Product,
            operands,
        } if operands.len() == 2 => (Expr::clone(&operands[1]), Expr::clone(&operands[0])),
        _ => (addend, Expr::constant(1)),
    }
}

impl Transform for Collector {
    fn visit_nary(&mut self, op: NAryOperator, operands: &[Arc<Expr>]) -> Expr {
        let operands = self.transform_all(operands);
        let mut groups = Groups::with_capacity(operands.len());
        let collected = match op {
            NAryOperator::Product => {
                for factor in operands {
                    let (base, exponent) = base_and_exponent(factor);
                    groups.add(base, exponent);
                }
                groups.rebuild(Expr::power)
            }
            NAryOperator::Addition => {
                for addend in operands {
                    let (term, coefficient) = term_and_coefficient(addend);
                    groups.add(term, coefficient);
                }
                groups.rebuild(|term, coefficient| Expr::product(vec![coefficient, term]))
            }
        };
        Expr::implode(op, collected)
    }
}

impl Pass for Collector {
    fn name(&self) -> &'static str {
        "collector"
    }

    fn apply(&self, expr: &Expr) -> Expr {
        Collector.transform(expr)
    }
}
