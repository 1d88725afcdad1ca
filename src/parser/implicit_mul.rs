//! Implicit multiplication for natural notation
//!
//! `2x`, `5x ln(e)`, `(a)(b)` and `3(x+1)` all multiply. The shunting-yard
//! stage asks this module before handling each token.

use super::tokens::TokenKind;

/// Tokens after which a value is complete
fn ends_operand(token: &TokenKind<'_>) -> bool {
    matches!(
        token,
        TokenKind::Number(_) | TokenKind::Variable(_) | TokenKind::RightParen
    )
}

/// Tokens that begin a new value
fn starts_operand(token: &TokenKind<'_>) -> bool {
    matches!(
        token,
        TokenKind::Number(_)
            | TokenKind::Variable(_)
            | TokenKind::Function(_)
            | TokenKind::LeftParen
    )
}

/// Check if a `Product` must be inserted between two adjacent tokens
pub(super) fn should_insert_mul(previous: Option<&TokenKind<'_>>, next: &TokenKind<'_>) -> bool {
    previous.is_some_and(|prev| ends_operand(prev) && starts_operand(next))
}
