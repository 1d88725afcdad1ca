use crate::Expr;

/// Source location span for error reporting
/// Represents a byte range of the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed byte offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed byte offset)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Check if this span has valid location info
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

/// Malformed input rejected by the parser.
///
/// Carries the offending source text so callers can echo it back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{location} in '{text}'", location = .span.map_or(String::new(), |s| s.display()))]
pub struct SyntaxError {
    pub message: String,
    pub text: String,
    pub span: Option<Span>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, text: impl Into<String>) -> Self {
        SyntaxError {
            message: message.into(),
            text: text.into(),
            span: None,
        }
    }

    pub fn at(message: impl Into<String>, text: impl Into<String>, span: Span) -> Self {
        SyntaxError {
            message: message.into(),
            text: text.into(),
            span: Some(span),
        }
    }
}

/// Numeric evaluation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("no value set for variable '{0}'")]
    UnboundVariable(String),
    #[error("cannot evaluate an equation")]
    Equation,
}

/// Errors surfaced by the [`Cas`](crate::Cas) operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CasError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
    /// An operation was called on input outside its domain
    /// (wrong variable count, equation where an expression is required, ...)
    #[error("domain error: {0}")]
    Domain(String),
    #[error("operation aborted")]
    Aborted,
    /// The simplifier reached its iteration cap before a fixed point.
    /// `partial` is the tree after the last completed iteration.
    #[error("simplification did not converge within {iterations} iterations")]
    NotConverged { iterations: usize, partial: Box<Expr> },
}

impl CasError {
    pub fn domain(msg: impl Into<String>) -> Self {
        CasError::Domain(msg.into())
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, CasError::Aborted)
    }

    /// Best tree reached by a simplification that ran out of iterations
    pub fn partial(&self) -> Option<&Expr> {
        match self {
            CasError::NotConverged { partial, .. } => Some(&**partial),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(3, 4).display(), " at position 4");
        assert_eq!(Span::new(0, 3).display(), " at positions 1-3");
        assert_eq!(Span::default().display(), "");
    }

    #[test]
    fn test_syntax_error_message() {
        let err = SyntaxError::at("unknown operator: #", "x # y", Span::new(2, 3));
        assert_eq!(err.to_string(), "unknown operator: # at position 3 in 'x # y'");
        let err: CasError = err.into();
        assert!(err.to_string().starts_with("syntax error: "));
        assert!(!err.is_aborted());
    }

    #[test]
    fn test_evaluation_error_message() {
        let err: CasError = EvaluationError::UnboundVariable("y".to_string()).into();
        assert_eq!(
            err.to_string(),
            "evaluation error: no value set for variable 'y'"
        );
        assert!(CasError::Aborted.is_aborted());
    }

    #[test]
    fn test_not_converged_keeps_partial_tree() {
        let err = CasError::NotConverged {
            iterations: 5,
            partial: Box::new(Expr::variable("x")),
        };
        assert_eq!(
            err.to_string(),
            "simplification did not converge within 5 iterations"
        );
        assert_eq!(err.partial(), Some(&Expr::variable("x")));
        assert_eq!(CasError::Aborted.partial(), None);
    }
}
