//! Computer Algebra Core
//!
//! A small symbolic engine: infix parsing, fixed-point simplification,
//! differentiation, substitution and numeric algorithms on top of them.
//!
//! # Features
//! - Shunting-yard parser with implicit multiplication (`2x`, `3(x + 1)`)
//!   and equations (`lhs = rhs`)
//! - Exact integer and rational arithmetic; overflow leaves terms unfolded
//! - Six-pass simplifier iterated to a fixed point, with canonical operand
//!   order so equal expressions compare equal
//! - Symbolic derivatives, Newton root finding with deflation, trapezoid
//!   integration and Taylor expansion
//! - Plain-text (re-parseable) and LaTeX output
//! - Cooperative cancellation from another thread
//!
//! # Usage Examples
//!
//! ```
//! use converger::Cas;
//! use std::collections::HashMap;
//!
//! let cas = Cas::new();
//! let expr = cas.parse("2x + 3y - 3x").unwrap();
//! let simplified = cas.simplify(&expr).unwrap();
//! assert_eq!(cas.to_plain_text(&simplified), "-x + 3*y");
//!
//! let value = cas
//!     .evaluate(&simplified, &HashMap::from([("x", 1.0), ("y", 2.0)]))
//!     .unwrap();
//! assert_eq!(value, 5.0);
//! ```
//!
//! ## Equations
//! ```
//! use converger::Cas;
//!
//! let cas = Cas::new();
//! let roots = cas.solve_numerically(&cas.parse("x^2 = 2").unwrap()).unwrap();
//! assert_eq!(roots.len(), 2);
//! assert!((roots[1] - 2f64.sqrt()).abs() < 1e-9);
//! ```

mod algorithms;
mod ast;
mod cancel;
mod cas;
mod differentiation;
mod display;
mod error;
mod evaluator;
pub mod functions;
mod parser;
mod simplification;
mod substitution;
pub mod visitor;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use algorithms::taylor::MAX_TAYLOR_ORDER;
pub use algorithms::{DEFAULT_INTEGRATION_STEP, SolverConfig};
pub use ast::{Associativity, BinaryOperator, Expr, ExprKind, NAryOperator, Operator};
pub use cancel::AbortHandle;
pub use cas::Cas;
pub use error::{CasError, EvaluationError, Span, SyntaxError};
pub use functions::{Function, Registry, SpecialConstant};
pub use parser::parse;
pub use simplification::DEFAULT_MAX_ITERATIONS;
