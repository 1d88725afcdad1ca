//! Centralized mathematical function registry
//!
//! This module provides a single source of truth for the built-in unary
//! functions, operators and named constants, including derivative formulas.

use crate::Expr;

pub(crate) mod definitions;
pub(crate) mod registry;

pub use registry::{Registry, SpecialConstant};

/// Built-in unary functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Ln,
    Abs,
    Sqrt,
}

impl Function {
    pub const ALL: [Function; 9] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Ln,
        Function::Abs,
        Function::Sqrt,
    ];

    /// Canonical name, as printed and parsed
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Ln => "ln",
            Function::Abs => "abs",
            Function::Sqrt => "sqrt",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

// ===== Helper functions for building derivative expressions =====

pub(crate) fn func(function: Function, arg: Expr) -> Expr {
    Expr::function(function, arg)
}

/// Multiply, optimizing for a unit factor on either side
pub(crate) fn mul_opt(a: Expr, b: Expr) -> Expr {
    if a.is_constant(1) {
        b
    } else if b.is_constant(1) {
        a
    } else {
        Expr::product(vec![a, b])
    }
}

/// `1 / e`
pub(crate) fn recip(e: Expr) -> Expr {
    Expr::division(Expr::constant(1), e)
}

pub(crate) fn neg(e: Expr) -> Expr {
    Expr::negate(e)
}
