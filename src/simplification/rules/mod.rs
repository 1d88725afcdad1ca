//! The six simplification passes
//!
//! Each pass is a bottom-up [`Transform`](crate::visitor::Transform) over the
//! whole tree. The engine runs them in [`pipeline`] order until a full round
//! changes nothing.

use crate::Expr;

mod algebraic;
mod collector;
mod constant_folder;
mod leveler;
mod rational;
pub(crate) mod sorter;

pub(crate) use algebraic::AlgebraicSimplifier;
pub(crate) use collector::Collector;
pub(crate) use constant_folder::ConstantFolder;
pub(crate) use leveler::Leveler;
pub(crate) use rational::RationalSimplifier;
pub(crate) use sorter::TreeSorter;

/// Core trait for all simplification passes
pub(crate) trait Pass: Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, expr: &Expr) -> Expr;
}

/// Passes in the order one iteration applies them
pub(crate) fn pipeline() -> [&'static dyn Pass; 6] {
    [
        &Leveler,
        &AlgebraicSimplifier,
        &RationalSimplifier,
        &Collector,
        &ConstantFolder,
        &TreeSorter,
    ]
}
