//! Parser module - converts strings to AST
//!
//! Pipeline: tokenize -> shunting-yard (infix to postfix) -> tree builder.
mod implicit_mul;
mod shunting_yard;
pub(crate) mod tokenizer;
mod tokens;
mod tree_builder;

use crate::error::SyntaxError;
use crate::functions::Registry;
use crate::Expr;
use tokens::RawToken;

/// Parse a formula string into an expression AST
///
/// A single top-level `=` produces an [`ExprKind::Equation`](crate::ExprKind::Equation)
/// with both sides parsed independently.
///
/// # Example
/// ```
/// use converger::{parse, Registry};
///
/// let expr = parse("x^2 + 2x", Registry::standard()).unwrap();
/// assert_eq!(expr.to_string(), "x^2 + 2*x");
/// ```
///
/// # Errors
/// Returns a [`SyntaxError`] if:
/// - The input is empty
/// - An operator symbol is unknown
/// - Parentheses are unbalanced
/// - Operands are missing or left over, or a number is malformed
pub fn parse(input: &str, registry: &Registry) -> Result<Expr, SyntaxError> {
    let tokens = tokenizer::tokenize(input);
    let sides: Vec<&[RawToken<'_>]> = tokens.split(|t| t.text == "=").collect();

    match sides.as_slice() {
        [expr] => parse_tokens(input, expr, registry),
        [lhs, rhs] => Ok(Expr::equation(
            parse_tokens(input, lhs, registry)?,
            parse_tokens(input, rhs, registry)?,
        )),
        _ => Err(SyntaxError::new(
            "an equation must contain exactly one '='",
            input,
        )),
    }
}

fn parse_tokens(
    source: &str,
    tokens: &[RawToken<'_>],
    registry: &Registry,
) -> Result<Expr, SyntaxError> {
    if tokens.is_empty() {
        return Err(SyntaxError::new("empty expression", source));
    }
    let postfix = shunting_yard::to_postfix(source, tokens, registry)?;
    tree_builder::build(source, postfix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExprKind, Function};

    fn p(input: &str) -> Expr {
        parse(input, Registry::standard()).unwrap()
    }

    #[test]
    fn test_subtraction_becomes_negated_addend() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        assert_eq!(p("x - y"), Expr::subtract(x, y));
    }

    #[test]
    fn test_function_and_constants() {
        let expr = p("sin(pi)");
        assert_eq!(expr, Expr::function(Function::Sin, Expr::variable("pi")));
    }

    #[test]
    fn test_equation() {
        let expr = p("x^2 = 4");
        match expr.kind() {
            ExprKind::Equation { lhs, rhs } => {
                assert_eq!(**lhs, Expr::power(Expr::variable("x"), Expr::constant(2)));
                assert_eq!(**rhs, Expr::constant(4));
            }
            other => panic!("expected equation, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_errors() {
        let registry = Registry::standard();
        let message = |input: &str| parse(input, registry).unwrap_err().message;
        assert_eq!(message(""), "empty expression");
        assert_eq!(message("x = "), "empty expression");
        assert_eq!(message("x = y = z"), "an equation must contain exactly one '='");
        assert_eq!(message("3 +"), "invalid expression");
        assert_eq!(message("* 3"), "invalid expression");
        assert_eq!(message("sin"), "invalid expression");
        assert_eq!(message("((x)"), "mismatched parentheses");
        assert_eq!(message("x $ 2"), "unknown operator: $");
    }

    #[test]
    fn test_error_keeps_source_text() {
        let err = parse("3 + (4", Registry::standard()).unwrap_err();
        assert_eq!(err.text, "3 + (4");
        assert!(err.span.is_some());
    }
}
