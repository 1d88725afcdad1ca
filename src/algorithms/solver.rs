//! Newton-Raphson root finding with deflation
//!
//! After each accepted root `r` the function is replaced by `f / (x - r)`
//! and the search restarts from the same seed, so Newton is pushed towards
//! a different root. The search ends at the first attempt that diverges or
//! lands outside the accepted range.

use crate::evaluator::Evaluator;
use crate::{Cas, CasError, Expr, ExprKind};

use super::single_variable;

const DEFAULT_SEED: f64 = 0.5632371895425321;
const DEFAULT_TOLERANCE: f64 = 1e-9;
const DEFAULT_ACCEPTANCE: f64 = 1e-5;
const DEFAULT_MAX_ITERATIONS: usize = 100;
const DEFAULT_DIVERGENCE_LIMIT: usize = 20;
const DEFAULT_MAX_MAGNITUDE: f64 = 1e10;

/// Tuning for [`Cas::solve_numerically`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Initial guess of every Newton run
    pub seed: f64,
    /// Step size below which a run has converged
    pub tolerance: f64,
    /// Largest final step accepted when a run stops on the iteration limit
    pub acceptance: f64,
    /// Newton steps per root
    pub max_iterations: usize,
    /// Consecutive growing steps after which a run is declared divergent
    pub divergence_limit: usize,
    /// Roots beyond `±max_magnitude` are rejected
    pub max_magnitude: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            seed: DEFAULT_SEED,
            tolerance: DEFAULT_TOLERANCE,
            acceptance: DEFAULT_ACCEPTANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            divergence_limit: DEFAULT_DIVERGENCE_LIMIT,
            max_magnitude: DEFAULT_MAX_MAGNITUDE,
        }
    }
}

/// Name bound to the value of the `index`-th root inside the deflated
/// function. `_` is not a word character, so no parsed variable matches it.
fn placeholder(index: usize) -> String {
    format!("_k{index}")
}

pub(crate) fn solve(cas: &Cas<'_>, equation: &Expr, config: &SolverConfig) -> Result<Vec<f64>, CasError> {
    let ExprKind::Equation { lhs, rhs } = equation.kind() else {
        return Err(CasError::domain("only an equation can be solved"));
    };
    let variable = single_variable(cas, equation, "an equation to solve")?;

    let mut function = cas.simplify(&Expr::subtract(Expr::clone(lhs), Expr::clone(rhs)))?;
    let mut evaluator = cas.evaluator(std::iter::empty());
    let mut roots = Vec::new();

    loop {
        let derivative = cas.differentiate(&function, &variable)?;
        let Some(root) = newton(cas, &mut evaluator, &function, &derivative, &variable, config)?
        else {
            break;
        };
        tracing::debug!(root, index = roots.len(), "root accepted");

        let name = placeholder(roots.len());
        evaluator.bind(&name, root);
        roots.push(root);

        let deflated = Expr::division(
            function,
            Expr::subtract(Expr::variable(&variable), Expr::variable(&name)),
        );
        function = cas.simplify(&deflated)?;
    }

    roots.sort_by(f64::total_cmp);
    roots.dedup();
    Ok(roots)
}

/// One Newton run from the seed. `Ok(None)` ends the whole search.
fn newton(
    cas: &Cas<'_>,
    evaluator: &mut Evaluator<'_>,
    function: &Expr,
    derivative: &Expr,
    variable: &str,
    config: &SolverConfig,
) -> Result<Option<f64>, CasError> {
    let mut x = config.seed;
    let mut previous_error = f64::INFINITY;
    let mut increases = 0usize;

    for _ in 0..config.max_iterations {
        evaluator.bind(variable, x);
        let value = cas.evaluate_with(evaluator, function)?;
        let slope = cas.evaluate_with(evaluator, derivative)?;

        let next = x - value / slope;
        if !next.is_finite() {
            tracing::trace!(x, "newton step left the reals");
            return Ok(None);
        }

        let error = (next - x).abs();
        x = next;
        if error < config.tolerance {
            previous_error = error;
            break;
        }
        if error > previous_error {
            increases += 1;
            if increases >= config.divergence_limit {
                tracing::trace!(x, "newton run diverged");
                return Ok(None);
            }
        } else {
            increases = 0;
        }
        previous_error = error;
    }

    if x.abs() <= config.max_magnitude && previous_error < config.acceptance {
        Ok(Some(x))
    } else {
        Ok(None)
    }
}
