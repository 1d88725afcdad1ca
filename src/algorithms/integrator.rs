//! Composite trapezoid rule

use crate::{Cas, CasError, Expr};

use super::single_variable;

/// Target width of one trapezoid
pub const DEFAULT_INTEGRATION_STEP: f64 = 1e-4;

pub(crate) fn integrate(
    cas: &Cas<'_>,
    function: &Expr,
    lower: f64,
    upper: f64,
    step: f64,
) -> Result<f64, CasError> {
    if function.is_equation() {
        return Err(CasError::domain("cannot integrate an equation"));
    }
    let variable = single_variable(cas, function, "a function to integrate")?;
    if !(step.is_finite() && step > 0.0) {
        return Err(CasError::domain(format!("invalid integration step {step}")));
    }
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(CasError::domain("integration bounds must be finite"));
    }
    if lower == upper {
        return Ok(0.0);
    }
    if lower > upper {
        return integrate(cas, function, upper, lower, step).map(|area| -area);
    }

    let function = cas.simplify(function)?;
    let mut evaluator = cas.evaluator(std::iter::empty());

    let width = upper - lower;
    // at least one trapezoid
    let subdivisions = ((width / step) as usize).max(1);
    let increment = width / subdivisions as f64;
    tracing::trace!(subdivisions, increment, "trapezoid grid");

    let mut sample = |x: f64| -> Result<f64, CasError> {
        evaluator.bind(&variable, x);
        cas.evaluate_with(&evaluator, &function)
    };

    let mut sum = 0.0;
    let mut left = sample(lower)?;
    for i in 1..=subdivisions {
        let right = sample(lower + i as f64 * increment)?;
        sum += left + right;
        left = right;
    }
    Ok(sum * increment / 2.0)
}
