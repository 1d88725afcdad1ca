//! Fixed-point simplification engine
//!
//! Runs the pass pipeline over the whole tree until one full iteration
//! returns a structurally equal tree, polling the cancellation token at the
//! top of every iteration.

use super::rules::{Pass, pipeline};
use crate::cancel::CancellationToken;
use crate::{CasError, Expr};

/// Default bound on pipeline iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

pub(crate) struct Simplifier<'a> {
    token: &'a CancellationToken,
    max_iterations: Option<usize>,
}

impl<'a> Simplifier<'a> {
    pub fn new(token: &'a CancellationToken) -> Self {
        Self {
            token,
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
        }
    }

    /// `None` iterates until the fixed point however long it takes
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Main simplification entry point.
    ///
    /// Fails with [`CasError::NotConverged`] when the iteration cap is hit.
    pub fn simplify(&self, expr: &Expr) -> Result<Expr, CasError> {
        let passes = pipeline();
        let mut current = expr.clone();
        let mut iterations = 0usize;

        loop {
            self.token.checkpoint()?;

            if let Some(max) = self.max_iterations
                && iterations >= max
            {
                tracing::warn!(
                    max,
                    expr = %current,
                    "simplification stopped before reaching a fixed point"
                );
                return Err(CasError::NotConverged {
                    iterations,
                    partial: Box::new(current),
                });
            }

            let next = run_pipeline(&passes, &current);
            iterations += 1;
            tracing::trace!(iteration = iterations, expr = %next, "pipeline iteration");

            if next == current {
                break;
            }
            current = next;
        }

        tracing::debug!(iterations, nodes = current.node_count(), "simplified");
        Ok(current)
    }
}

fn run_pipeline(passes: &[&dyn Pass], expr: &Expr) -> Expr {
    passes.iter().fold(expr.clone(), |current, pass| {
        let next = pass.apply(&current);
        if next != current {
            tracing::trace!(pass = pass.name(), "pass rewrote tree");
        }
        next
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Registry, parse};

    fn simplify(input: &str) -> String {
        let token = CancellationToken::new();
        let expr = parse(input, Registry::standard()).unwrap();
        Simplifier::new(&token).simplify(&expr).unwrap().to_string()
    }

    #[test]
    fn test_reaches_fixed_point() {
        assert_eq!(simplify("x + x"), "2*x");
        assert_eq!(simplify("x*x*x"), "x^3");
        assert_eq!(simplify("2x + 3y - 3x"), "-x + 3*y");
    }

    #[test]
    fn test_iteration_cap_reports_partial_result() {
        let token = CancellationToken::new();
        let expr = parse("x + x", Registry::standard()).unwrap();
        let err = Simplifier::new(&token)
            .with_max_iterations(Some(0))
            .simplify(&expr)
            .unwrap_err();
        assert_eq!(
            err,
            CasError::NotConverged {
                iterations: 0,
                partial: Box::new(expr),
            }
        );
    }

    #[test]
    fn test_abort_before_first_iteration() {
        let token = CancellationToken::new();
        token.handle().abort();
        let expr = parse("x + x", Registry::standard()).unwrap();
        let result = Simplifier::new(&token).simplify(&expr);
        assert_eq!(result, Err(CasError::Aborted));
    }
}
