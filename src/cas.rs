//! The `Cas` facade
//!
//! One `Cas` per logical user. It owns the cancellation token and the
//! tuning knobs, and borrows an immutable [`Registry`]: the shared standard
//! one by default, or any registry passed to [`Cas::with_registry`].
//!
//! # Example
//! ```
//! use converger::Cas;
//!
//! let cas = Cas::new();
//! let expr = cas.parse("x^2 + 2x").unwrap();
//! let derivative = cas.differentiate(&expr, "x").unwrap();
//! assert_eq!(cas.to_plain_text(&derivative), "2 + 2*x");
//! ```

use std::collections::{BTreeSet, HashMap};

use crate::algorithms::{self, DEFAULT_INTEGRATION_STEP, SolverConfig};
use crate::cancel::{AbortHandle, CancellationToken};
use crate::differentiation::Differentiator;
use crate::display::{LatexPrinter, PlainTextPrinter};
use crate::evaluator::Evaluator;
use crate::functions::Registry;
use crate::simplification::{DEFAULT_MAX_ITERATIONS, Simplifier};
use crate::substitution::Substitutor;
use crate::visitor::{Transform, VariableCollector, walk_expr};
use crate::{CasError, Expr, parser};

/// Computer algebra facade: parsing, symbolic manipulation, numerics and
/// printing behind one object.
#[derive(Debug)]
pub struct Cas<'r> {
    registry: &'r Registry,
    token: CancellationToken,
    max_simplify_iterations: Option<usize>,
    solver: SolverConfig,
    integration_step: f64,
}

impl Default for Cas<'_> {
    fn default() -> Self {
        Cas {
            registry: Registry::standard(),
            token: CancellationToken::new(),
            max_simplify_iterations: Some(DEFAULT_MAX_ITERATIONS),
            solver: SolverConfig::default(),
            integration_step: DEFAULT_INTEGRATION_STEP,
        }
    }
}

impl<'r> Cas<'r> {
    /// Create an instance with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an instance that parses, evaluates and prints through
    /// `registry` instead of the shared standard one
    pub fn with_registry(registry: &'r Registry) -> Self {
        Cas {
            registry,
            ..Self::default()
        }
    }

    /// Bound on simplifier pipeline iterations; `None` runs to the fixed
    /// point however long it takes. Hitting the bound fails the operation
    /// with [`CasError::NotConverged`].
    pub fn max_simplify_iterations(mut self, max: Option<usize>) -> Self {
        self.max_simplify_iterations = max;
        self
    }

    pub fn solver_config(mut self, config: SolverConfig) -> Self {
        self.solver = config;
        self
    }

    /// Target trapezoid width for [`Cas::integrate_numerically`]
    pub fn integration_step(mut self, step: f64) -> Self {
        self.integration_step = step;
        self
    }

    /// Parse infix text into an expression tree
    pub fn parse(&self, input: &str) -> Result<Expr, CasError> {
        Ok(parser::parse(input, self.registry)?)
    }

    /// Rewrite to canonical form
    pub fn simplify(&self, expr: &Expr) -> Result<Expr, CasError> {
        Simplifier::new(&self.token)
            .with_max_iterations(self.max_simplify_iterations)
            .simplify(expr)
    }

    /// Simplified derivative of `expr` with respect to `variable`.
    ///
    /// An equation differentiates side by side.
    pub fn differentiate(&self, expr: &Expr, variable: &str) -> Result<Expr, CasError> {
        let simplified = self.simplify(expr)?;
        let derivative = Differentiator::new(variable, self.registry).derive(&simplified);
        self.simplify(&derivative)
    }

    /// Replace variables by expressions, without simplifying
    pub fn substitute(&self, expr: &Expr, values: &HashMap<String, Expr>) -> Expr {
        Substitutor::new(values).transform(expr)
    }

    /// Numeric value of `expr`. `e`, `pi` and `π` are always bound to their
    /// true values.
    pub fn evaluate(&self, expr: &Expr, values: &HashMap<&str, f64>) -> Result<f64, CasError> {
        let evaluator = self.evaluator(values.iter().map(|(name, value)| (*name, *value)));
        self.evaluate_with(&evaluator, expr)
    }

    /// Free variables of `expr` in lexicographic order, named constants
    /// excluded
    pub fn enumerate_variables(&self, expr: &Expr) -> BTreeSet<String> {
        let mut collector = VariableCollector::new(self.registry);
        walk_expr(expr, &mut collector);
        collector.variables
    }

    /// Real roots of a one-variable equation, ascending.
    ///
    /// A search that finds nothing returns an empty vector rather than an
    /// error.
    #[tracing::instrument(level = "debug", skip_all, fields(equation = %equation))]
    pub fn solve_numerically(&self, equation: &Expr) -> Result<Vec<f64>, CasError> {
        let roots = algorithms::solver::solve(self, equation, &self.solver)?;
        tracing::debug!(count = roots.len(), "solver finished");
        Ok(roots)
    }

    /// Definite integral of a one-variable function over `[lower, upper]`
    #[tracing::instrument(level = "debug", skip_all, fields(function = %function, lower = lower, upper = upper))]
    pub fn integrate_numerically(
        &self,
        function: &Expr,
        lower: f64,
        upper: f64,
    ) -> Result<f64, CasError> {
        algorithms::integrator::integrate(self, function, lower, upper, self.integration_step)
    }

    /// Taylor polynomial of `function` in `variable` around `point`, up to
    /// and including the `order`-th term
    #[tracing::instrument(level = "debug", skip_all, fields(function = %function, variable = variable, order = order))]
    pub fn taylor_series(
        &self,
        function: &Expr,
        variable: &str,
        point: &Expr,
        order: u32,
    ) -> Result<Expr, CasError> {
        algorithms::taylor::expand(self, function, variable, point, order)
    }

    pub fn to_plain_text(&self, expr: &Expr) -> String {
        PlainTextPrinter::new().render(expr)
    }

    pub fn to_latex_text(&self, expr: &Expr) -> String {
        LatexPrinter::new(self.registry).render(expr)
    }

    /// Abort the operation currently running on this instance.
    ///
    /// It fails with [`CasError::Aborted`] at its next checkpoint. A request
    /// made while nothing runs aborts the next operation.
    pub fn abort(&self) {
        self.token.handle().abort();
    }

    /// Handle for aborting from another thread
    pub fn abort_handle(&self) -> AbortHandle {
        self.token.handle()
    }

    pub(crate) fn evaluator<'v>(
        &self,
        values: impl IntoIterator<Item = (&'v str, f64)>,
    ) -> Evaluator<'r> {
        Evaluator::new(self.registry, values)
    }

    /// Evaluate after polling the cancellation token
    pub(crate) fn evaluate_with(
        &self,
        evaluator: &Evaluator<'_>,
        expr: &Expr,
    ) -> Result<f64, CasError> {
        self.token.checkpoint()?;
        Ok(evaluator.evaluate(expr)?)
    }
}
