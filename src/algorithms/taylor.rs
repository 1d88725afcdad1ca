//! Taylor polynomial of a function around a point

use std::collections::HashMap;

use crate::ast::NAryOperator;
use crate::{Cas, CasError, Expr};

/// `20!` is the largest factorial that fits in an `i64`
pub const MAX_TAYLOR_ORDER: u32 = 20;

/// `sum_{n=0}^{order} f^(n)(point) * (x - point)^n / n!`, simplified
pub(crate) fn expand(
    cas: &Cas<'_>,
    function: &Expr,
    variable: &str,
    point: &Expr,
    order: u32,
) -> Result<Expr, CasError> {
    if function.is_equation() || point.is_equation() {
        return Err(CasError::domain("cannot expand an equation"));
    }
    if order > MAX_TAYLOR_ORDER {
        return Err(CasError::domain(format!(
            "order {order} exceeds the maximum of {MAX_TAYLOR_ORDER}"
        )));
    }

    let at_point = HashMap::from([(variable.to_string(), point.clone())]);
    let offset = Expr::subtract(Expr::variable(variable), point.clone());

    let mut derivative = cas.simplify(function)?;
    let mut terms = Vec::with_capacity(order as usize + 1);
    terms.push(cas.substitute(&derivative, &at_point));

    let mut factorial = 1i64;
    for n in 1..=order {
        factorial = factorial
            .checked_mul(i64::from(n))
            .ok_or_else(|| CasError::domain("factorial overflow"))?;
        derivative = cas.differentiate(&derivative, variable)?;
        terms.push(Expr::division(
            Expr::product(vec![
                cas.substitute(&derivative, &at_point),
                Expr::power(offset.clone(), Expr::constant(i64::from(n))),
            ]),
            Expr::constant(factorial),
        ));
    }

    tracing::trace!(terms = terms.len(), "taylor terms built");
    cas.simplify(&Expr::implode(NAryOperator::Addition, terms))
}
