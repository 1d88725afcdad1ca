//! Numerical algorithms built on the symbolic core
//!
//! Each algorithm checks its preconditions through the facade, simplifies
//! its input once and then evaluates the result numerically.

pub(crate) mod integrator;
pub(crate) mod solver;
pub(crate) mod taylor;

pub use integrator::DEFAULT_INTEGRATION_STEP;
pub use solver::SolverConfig;

use crate::{Cas, CasError, Expr};

/// The single free variable of `expr`, or a domain error naming `what`
pub(crate) fn single_variable(cas: &Cas<'_>, expr: &Expr, what: &str) -> Result<String, CasError> {
    let mut variables = cas.enumerate_variables(expr).into_iter();
    match (variables.next(), variables.next()) {
        (Some(variable), None) => Ok(variable),
        _ => Err(CasError::domain(format!(
            "{what} must contain exactly one variable"
        ))),
    }
}
