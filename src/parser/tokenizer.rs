//! Character-class scanner
//!
//! Cuts the input into runs of word characters, number characters and single
//! symbols. Whitespace separates runs and is discarded. The tokenizer never
//! fails; unknown symbols are rejected later by the shunting-yard stage.

use super::tokens::RawToken;
use crate::error::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Word,
    Number,
    Symbol,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_alphabetic() || c == '\'' {
            CharClass::Word
        } else if c.is_ascii_digit() || c == '.' {
            CharClass::Number
        } else if c.is_whitespace() {
            CharClass::Whitespace
        } else {
            CharClass::Symbol
        }
    }
}

pub(crate) fn tokenize(input: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::with_capacity(input.len() / 2 + 1);
    // class and start offset of the run being accumulated
    let mut current: Option<(CharClass, usize)> = None;

    for (i, c) in input.char_indices() {
        let class = CharClass::of(c);
        if let Some((run, start)) = current
            && (run == CharClass::Symbol || run != class)
        {
            tokens.push(RawToken {
                text: &input[start..i],
                span: Span::new(start, i),
            });
            current = None;
        }
        if current.is_none() && class != CharClass::Whitespace {
            current = Some((class, i));
        }
    }
    if let Some((_, start)) = current {
        tokens.push(RawToken {
            text: &input[start..],
            span: Span::new(start, input.len()),
        });
    }
    tokens
}
