//! Infix to postfix conversion
//!
//! Classic operator-precedence algorithm, extended with implicit
//! multiplication and unary signs. A unary `-` is emitted as the operand `-1`
//! followed by a pending `Product`; a unary `+` is dropped.

use super::implicit_mul::should_insert_mul;
use super::tokens::{RawToken, Token, TokenKind};
use crate::ast::{Associativity, Operator};
use crate::error::{Span, SyntaxError};
use crate::functions::Registry;

pub(crate) fn to_postfix<'src>(
    source: &str,
    tokens: &[RawToken<'src>],
    registry: &Registry,
) -> Result<Vec<Token<'src>>, SyntaxError> {
    let mut parser = ShuntingYard {
        source,
        registry,
        output: Vec::with_capacity(tokens.len()),
        stack: Vec::new(),
        expect_operand: true,
        previous: None,
    };
    for raw in tokens {
        parser.push(raw)?;
    }
    parser.finish()
}

struct ShuntingYard<'src, 'a> {
    source: &'a str,
    registry: &'a Registry,
    output: Vec<Token<'src>>,
    stack: Vec<Token<'src>>,
    /// Start of input, after `(`, after an operator: a sign here is unary
    expect_operand: bool,
    previous: Option<TokenKind<'src>>,
}

impl<'src> ShuntingYard<'src, '_> {
    fn classify(&self, raw: &RawToken<'src>) -> Result<Token<'src>, SyntaxError> {
        let first = raw.text.chars().next().unwrap_or(' ');
        let kind = if first.is_ascii_digit() || first == '.' {
            TokenKind::Number(raw.text)
        } else if first.is_alphabetic() || first == '\'' {
            match self.registry.function(raw.text) {
                Some(function) => TokenKind::Function(function),
                None => TokenKind::Variable(raw.text),
            }
        } else {
            match raw.text {
                "(" => TokenKind::LeftParen,
                ")" => TokenKind::RightParen,
                symbol => match self.registry.operator(symbol) {
                    Some(op) => TokenKind::Operator(op),
                    None => {
                        return Err(SyntaxError::at(
                            format!("unknown operator: {}", symbol),
                            self.source,
                            raw.span,
                        ));
                    }
                },
            }
        };
        Ok(Token::new(kind, raw.span))
    }

    fn push(&mut self, raw: &RawToken<'src>) -> Result<(), SyntaxError> {
        let token = self.classify(raw)?;

        if should_insert_mul(self.previous.as_ref(), &token.kind) {
            self.push_operator(Operator::Product, token.span);
        }

        match token.kind {
            TokenKind::Number(_) | TokenKind::Variable(_) => {
                self.output.push(token);
                self.expect_operand = false;
            }
            TokenKind::Function(_) => {
                self.stack.push(token);
                self.expect_operand = true;
            }
            TokenKind::LeftParen => {
                self.stack.push(token);
                self.expect_operand = true;
            }
            TokenKind::RightParen => {
                self.close_paren(token.span)?;
                self.expect_operand = false;
            }
            TokenKind::Operator(op) => self.push_operator(op, token.span),
        }

        self.previous = Some(token.kind);
        Ok(())
    }

    fn push_operator(&mut self, op: Operator, span: Span) {
        if self.expect_operand {
            match op {
                Operator::Subtraction => {
                    self.output.push(Token::new(TokenKind::Number("-1"), span));
                    self.stack
                        .push(Token::new(TokenKind::Operator(Operator::Product), span));
                    return;
                }
                Operator::Addition => return,
                // a binary operator without left operand; the tree builder reports it
                _ => {}
            }
        }

        while let Some(&Token {
            kind: TokenKind::Operator(top),
            ..
        }) = self.stack.last()
        {
            let pops = match op.associativity() {
                Associativity::Left => op.precedence() <= top.precedence(),
                Associativity::Right => op.precedence() < top.precedence(),
            };
            if !pops {
                break;
            }
            if let Some(token) = self.stack.pop() {
                self.output.push(token);
            }
        }
        self.stack.push(Token::new(TokenKind::Operator(op), span));
        self.expect_operand = true;
    }

    fn close_paren(&mut self, span: Span) -> Result<(), SyntaxError> {
        loop {
            match self.stack.pop() {
                None => return Err(self.mismatched(span)),
                Some(Token {
                    kind: TokenKind::LeftParen,
                    ..
                }) => break,
                Some(token) => self.output.push(token),
            }
        }
        if matches!(
            self.stack.last(),
            Some(Token {
                kind: TokenKind::Function(_),
                ..
            })
        ) && let Some(token) = self.stack.pop()
        {
            self.output.push(token);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Token<'src>>, SyntaxError> {
        while let Some(token) = self.stack.pop() {
            if token.kind == TokenKind::LeftParen {
                return Err(self.mismatched(token.span));
            }
            self.output.push(token);
        }
        Ok(self.output)
    }

    fn mismatched(&self, span: Span) -> SyntaxError {
        SyntaxError::at("mismatched parentheses", self.source, span)
    }
}
