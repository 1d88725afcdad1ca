//! Postfix to expression tree

use super::tokens::{Token, TokenKind};
use crate::ast::Operator;
use crate::error::{Span, SyntaxError};
use crate::Expr;

pub(crate) fn build(source: &str, postfix: Vec<Token<'_>>) -> Result<Expr, SyntaxError> {
    let mut operands: Vec<Expr> = Vec::with_capacity(postfix.len());
    let invalid = |span: Span| SyntaxError::at("invalid expression", source, span);

    for token in postfix {
        match token.kind {
            TokenKind::Number(text) => operands.push(parse_number(source, text, token.span)?),
            TokenKind::Variable(name) => operands.push(Expr::variable(name)),
            TokenKind::Function(function) => {
                let argument = operands.pop().ok_or_else(|| invalid(token.span))?;
                operands.push(Expr::function(function, argument));
            }
            TokenKind::Operator(op) => {
                let right = operands.pop().ok_or_else(|| invalid(token.span))?;
                let left = operands.pop().ok_or_else(|| invalid(token.span))?;
                operands.push(combine(op, left, right));
            }
            TokenKind::LeftParen | TokenKind::RightParen => return Err(invalid(token.span)),
        }
    }

    match operands.len() {
        1 => operands.pop().ok_or_else(|| invalid(Span::default())),
        _ => Err(SyntaxError::new("invalid expression", source)),
    }
}

fn combine(op: Operator, left: Expr, right: Expr) -> Expr {
    match op {
        Operator::Addition => Expr::sum(vec![left, right]),
        Operator::Subtraction => Expr::subtract(left, right),
        Operator::Product => Expr::product(vec![left, right]),
        Operator::Division => Expr::division(left, right),
        Operator::Power => Expr::power(left, right),
    }
}

/// `d1.d2` becomes `d1d2 / 10^len(d2)`; a number without fractional digits
/// stays a plain constant.
fn parse_number(source: &str, text: &str, span: Span) -> Result<Expr, SyntaxError> {
    let malformed = || SyntaxError::at(format!("malformed number: {}", text), source, span);

    let (integer, fraction) = match text.split_once('.') {
        Some((_, fraction)) if fraction.contains('.') => return Err(malformed()),
        Some(parts) => parts,
        None => (text, ""),
    };
    let digits = format!("{}{}", integer, fraction);
    if digits.is_empty() {
        return Err(malformed());
    }
    let value: i64 = digits.parse().map_err(|_| malformed())?;
    if fraction.is_empty() {
        return Ok(Expr::constant(value));
    }
    let scale = u32::try_from(fraction.len())
        .ok()
        .and_then(|len| 10i64.checked_pow(len))
        .ok_or_else(malformed)?;
    Ok(Expr::division(Expr::constant(value), Expr::constant(scale)))
}
