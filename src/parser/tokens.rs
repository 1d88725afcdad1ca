use crate::ast::Operator;
use crate::error::Span;
use crate::functions::Function;

/// A run of same-class characters as cut by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawToken<'src> {
    pub text: &'src str,
    pub span: Span,
}

/// Classified token flowing through the shunting-yard stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind<'src> {
    /// Digits with at most one `.`; the synthesized unary sign is `"-1"`
    Number(&'src str),
    Variable(&'src str),
    Function(Function),
    Operator(Operator),
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind<'src>, span: Span) -> Self {
        Token { kind, span }
    }
}
