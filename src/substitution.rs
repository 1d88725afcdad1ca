//! Variable substitution

use std::collections::HashMap;

use crate::visitor::Transform;
use crate::Expr;

/// Replaces every mapped variable leaf with its expression in one pass.
/// Replacements are not themselves rewritten and nothing is simplified.
pub(crate) struct Substitutor<'a> {
    values: &'a HashMap<String, Expr>,
}

impl<'a> Substitutor<'a> {
    pub fn new(values: &'a HashMap<String, Expr>) -> Self {
        Substitutor { values }
    }
}

impl Transform for Substitutor<'_> {
    fn visit_variable(&mut self, expr: &Expr, name: &str) -> Expr {
        self.values.get(name).cloned().unwrap_or_else(|| expr.clone())
    }
}
