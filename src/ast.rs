//! Abstract Syntax Tree for mathematical expressions
//!
//! `Expr` is immutable. Equality and hashing are structural; the hash is
//! computed once at construction so map lookups and the simplifier's
//! fixed-point check can reject unequal trees without walking them.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::functions::Function;

/// Binary operators. The left operand is the numerator / base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BinaryOperator {
    Division,
    Power,
}

/// Associative operators taking two or more operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NAryOperator {
    Addition,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Every operator the parser understands.
///
/// `Subtraction` only exists between tokenizing and tree building; the tree
/// builder rewrites `a - b` to `a + (-1)*b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Addition,
    Subtraction,
    Product,
    Division,
    Power,
}

impl Operator {
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Addition | Operator::Subtraction => 1,
            Operator::Product | Operator::Division => 2,
            Operator::Power => 3,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            Operator::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Addition => "+",
            Operator::Subtraction => "-",
            Operator::Product => "*",
            Operator::Division => "/",
            Operator::Power => "^",
        }
    }
}

impl From<BinaryOperator> for Operator {
    fn from(op: BinaryOperator) -> Self {
        match op {
            BinaryOperator::Division => Operator::Division,
            BinaryOperator::Power => Operator::Power,
        }
    }
}

impl From<NAryOperator> for Operator {
    fn from(op: NAryOperator) -> Self {
        match op {
            NAryOperator::Addition => Operator::Addition,
            NAryOperator::Product => Operator::Product,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    /// Structural hash of `kind`, fixed at construction
    hash: u64,
    kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.kind == other.kind
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// Symbolic identifier (e.g. "x", "arg", "pi")
    Variable(Arc<str>),

    /// Exact integer. Rationals are `Division(Constant, Constant)`.
    Constant(i64),

    Binary {
        op: BinaryOperator,
        left: Arc<Expr>,
        right: Arc<Expr>,
    },

    /// Always holds at least two operands
    NAry {
        op: NAryOperator,
        operands: Vec<Arc<Expr>>,
    },

    Function {
        function: Function,
        argument: Arc<Expr>,
    },

    /// Only meaningful at the top level
    Equation { lhs: Arc<Expr>, rhs: Arc<Expr> },
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        let mut hasher = FxHasher::default();
        kind.hash(&mut hasher);
        Expr {
            hash: hasher.finish(),
            kind,
        }
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    // Constructors

    pub fn variable(name: impl AsRef<str>) -> Self {
        Expr::new(ExprKind::Variable(Arc::from(name.as_ref())))
    }

    pub fn constant(value: i64) -> Self {
        Expr::new(ExprKind::Constant(value))
    }

    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::new(ExprKind::Binary {
            op,
            left: Arc::new(left),
            right: Arc::new(right),
        })
    }

    pub fn division(numerator: Expr, denominator: Expr) -> Self {
        Expr::binary(BinaryOperator::Division, numerator, denominator)
    }

    pub fn power(base: Expr, exponent: Expr) -> Self {
        Expr::binary(BinaryOperator::Power, base, exponent)
    }

    /// Build an n-ary node. Callers are responsible for passing two or more
    /// operands; use [`Expr::implode`] when the count is not known.
    pub fn nary(op: NAryOperator, operands: Vec<Expr>) -> Self {
        debug_assert!(operands.len() >= 2, "n-ary node needs two operands");
        Expr::new(ExprKind::NAry {
            op,
            operands: operands.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn sum(operands: Vec<Expr>) -> Self {
        Expr::nary(NAryOperator::Addition, operands)
    }

    pub fn product(operands: Vec<Expr>) -> Self {
        Expr::nary(NAryOperator::Product, operands)
    }

    pub fn function(function: Function, argument: Expr) -> Self {
        Expr::new(ExprKind::Function {
            function,
            argument: Arc::new(argument),
        })
    }

    pub fn equation(lhs: Expr, rhs: Expr) -> Self {
        Expr::new(ExprKind::Equation {
            lhs: Arc::new(lhs),
            rhs: Arc::new(rhs),
        })
    }

    /// `(-1) * expr`
    pub fn negate(expr: Expr) -> Self {
        Expr::product(vec![Expr::constant(-1), expr])
    }

    /// `left + (-1) * right`
    pub fn subtract(left: Expr, right: Expr) -> Self {
        Expr::sum(vec![left, Expr::negate(right)])
    }

    /// Exact fraction; collapses to a constant when the denominator is 1
    pub fn rational(numerator: i64, denominator: i64) -> Self {
        if denominator == 1 {
            Expr::constant(numerator)
        } else {
            Expr::division(Expr::constant(numerator), Expr::constant(denominator))
        }
    }

    /// Safe n-ary construction: no operands gives `0`, one operand gives the
    /// operand itself.
    pub fn implode(op: NAryOperator, mut operands: Vec<Expr>) -> Self {
        match operands.len() {
            0 => Expr::constant(0),
            1 => operands.pop().unwrap_or_else(|| Expr::constant(0)),
            _ => Expr::nary(op, operands),
        }
    }

    // Accessors

    pub fn as_constant(&self) -> Option<i64> {
        match &self.kind {
            ExprKind::Constant(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_constant(&self, value: i64) -> bool {
        self.as_constant() == Some(value)
    }

    pub fn as_variable(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Variable(name) => Some(&**name),
            _ => None,
        }
    }

    /// `Some((n, d))` for a constant (`d = 1`) or a constant/constant division
    pub fn as_rational(&self) -> Option<(i64, i64)> {
        match &self.kind {
            ExprKind::Constant(value) => Some((*value, 1)),
            ExprKind::Binary {
                op: BinaryOperator::Division,
                left,
                right,
            } => Some((left.as_constant()?, right.as_constant()?)),
            _ => None,
        }
    }

    pub fn is_equation(&self) -> bool {
        matches!(self.kind, ExprKind::Equation { .. })
    }

    /// Count the total number of nodes in the expression tree
    pub fn node_count(&self) -> usize {
        1 + match &self.kind {
            ExprKind::Variable(_) | ExprKind::Constant(_) => 0,
            ExprKind::Binary { left, right, .. } => left.node_count() + right.node_count(),
            ExprKind::NAry { operands, .. } => operands.iter().map(|o| o.node_count()).sum(),
            ExprKind::Function { argument, .. } => argument.node_count(),
            ExprKind::Equation { lhs, rhs } => lhs.node_count() + rhs.node_count(),
        }
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::constant(value)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::variable(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_structural_equality() {
        let a = Expr::sum(vec![Expr::variable("x"), Expr::constant(2)]);
        let b = Expr::sum(vec![Expr::variable("x"), Expr::constant(2)]);
        let c = Expr::sum(vec![Expr::constant(2), Expr::variable("x")]);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = FxHashSet::default();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_implode() {
        assert_eq!(Expr::implode(NAryOperator::Addition, vec![]), Expr::constant(0));
        assert_eq!(
            Expr::implode(NAryOperator::Product, vec![Expr::variable("x")]),
            Expr::variable("x")
        );
        let both = Expr::implode(
            NAryOperator::Product,
            vec![Expr::variable("x"), Expr::variable("y")],
        );
        assert!(matches!(both.kind(), ExprKind::NAry { operands, .. } if operands.len() == 2));
    }

    #[test]
    fn test_helper_constructors() {
        let x = Expr::variable("x");
        assert_eq!(
            Expr::negate(x.clone()),
            Expr::product(vec![Expr::constant(-1), x.clone()])
        );
        assert_eq!(
            Expr::subtract(x.clone(), Expr::constant(3)),
            Expr::sum(vec![
                x,
                Expr::product(vec![Expr::constant(-1), Expr::constant(3)])
            ])
        );
        assert_eq!(Expr::rational(4, 1), Expr::constant(4));
        assert_eq!(Expr::rational(1, 2).as_rational(), Some((1, 2)));
    }

    #[test]
    fn test_node_count() {
        // sin(x) + x^2
        let expr = Expr::sum(vec![
            Expr::function(Function::Sin, Expr::variable("x")),
            Expr::power(Expr::variable("x"), Expr::constant(2)),
        ]);
        assert_eq!(expr.node_count(), 6);
    }
}
