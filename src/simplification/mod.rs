//! Simplification framework - reduces expressions to a canonical form
//!
//! Six passes (leveler, algebraic, rational, collector, constant folder,
//! sorter) are iterated until the tree stops changing.
pub(crate) mod engine;
pub(crate) mod helpers;
pub(crate) mod rules;

pub use engine::DEFAULT_MAX_ITERATIONS;
pub(crate) use engine::Simplifier;
