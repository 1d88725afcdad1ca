//! Text output for expressions.
//!
//! Two formats share one printing template:
//!
//! ## Plain text (`to_string()` / `{}`)
//! Re-parseable notation, e.g. `x^2 + 2*x - 1` or `sin(x)/2`. Parsing the
//! output rebuilds the tree it was printed from.
//!
//! ## LaTeX (`Cas::to_latex_text`)
//! For typesetting, e.g. `x^{2} + 2 \cdot x - 1` or `\frac{\sin\left(x\right)}{2}`.
//!
//! Parentheses are decided from a stack of parent operators: a child is
//! wrapped when its parent binds at least as tightly. Function arguments,
//! LaTeX groups and equation sides push an empty context so nothing inside
//! them is wrapped on their account.

use std::fmt;
use std::sync::Arc;

use crate::ast::{BinaryOperator, NAryOperator, Operator};
use crate::functions::registry::LatexForm;
use crate::functions::{Function, Registry};
use crate::{Expr, ExprKind};

/// Output buffer and the parent-operator stack
struct PrintState {
    out: String,
    parents: Vec<Option<Operator>>,
}

impl PrintState {
    fn new() -> Self {
        PrintState {
            out: String::new(),
            parents: vec![None],
        }
    }

    fn parent(&self) -> Option<Operator> {
        self.parents.last().copied().flatten()
    }
}

/// If an addend after the first carries a negative sign, the positive part to
/// print after ` - `
fn extract_negative(expr: &Expr) -> Option<Expr> {
    match expr.kind() {
        ExprKind::Constant(value) if *value < 0 => value.checked_neg().map(Expr::constant),
        ExprKind::NAry {
            op: NAryOperator::Product,
            operands,
        } => {
            let lead = operands.first()?.as_constant()?;
            if lead == -1 {
                let rest = operands[1..].iter().map(|o| Expr::clone(o)).collect();
                return Some(Expr::implode(NAryOperator::Product, rest));
            }
            if lead < 0 {
                let mut factors: Vec<Expr> = Vec::with_capacity(operands.len());
                factors.push(Expr::constant(lead.checked_neg()?));
                factors.extend(operands[1..].iter().map(|o| Expr::clone(o)));
                return Some(Expr::product(factors));
            }
            None
        }
        _ => None,
    }
}

/// Printing template. Implementors supply the format-specific pieces; the
/// provided methods handle precedence, signs and traversal.
trait Printer: Sized {
    fn state(&mut self) -> &mut PrintState;

    fn open_paren(&self) -> &'static str;

    fn close_paren(&self) -> &'static str;

    fn product_separator(&self) -> &'static str;

    fn equals(&self) -> &'static str {
        " = "
    }

    fn needs_parentheses(&self, parent: Operator, current: Operator) -> bool {
        parent.precedence() >= current.precedence()
    }

    fn print_variable(&mut self, name: &str) {
        self.write(name);
    }

    fn print_division(&mut self, numerator: &Expr, denominator: &Expr);

    fn print_power(&mut self, base: &Expr, exponent: &Expr);

    fn print_function(&mut self, function: Function, argument: &Expr);

    // ===== provided =====

    fn write(&mut self, text: &str) {
        self.state().out.push_str(text);
    }

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.state().out)
    }

    fn print(&mut self, expr: &Expr) {
        match expr.kind() {
            ExprKind::Variable(name) => self.print_variable(name),
            ExprKind::Constant(value) => self.print_constant(*value),
            ExprKind::Binary { op, left, right } => {
                self.wrapped(Operator::from(*op), |p| match op {
                    BinaryOperator::Division => p.print_division(left, right),
                    BinaryOperator::Power => p.print_power(left, right),
                })
            }
            ExprKind::NAry { op, operands } => {
                self.wrapped(Operator::from(*op), |p| match op {
                    NAryOperator::Addition => p.print_sum(operands),
                    NAryOperator::Product => p.print_product(operands),
                })
            }
            ExprKind::Function { function, argument } => {
                self.print_function(*function, argument)
            }
            ExprKind::Equation { lhs, rhs } => {
                self.print_grouped(lhs);
                let equals = self.equals();
                self.write(equals);
                self.print_grouped(rhs);
            }
        }
    }

    /// Print `body`, parenthesized if the current parent requires it
    fn wrapped(&mut self, current: Operator, body: impl FnOnce(&mut Self)) {
        let parent = self.state().parent();
        let wrap = parent.is_some_and(|parent| self.needs_parentheses(parent, current));
        if wrap {
            let open = self.open_paren();
            self.write(open);
        }
        body(self);
        if wrap {
            let close = self.close_paren();
            self.write(close);
        }
    }

    fn print_child(&mut self, expr: &Expr, parent: Operator) {
        self.state().parents.push(Some(parent));
        self.print(expr);
        self.state().parents.pop();
    }

    /// Print in a context that already delimits `expr`
    fn print_grouped(&mut self, expr: &Expr) {
        self.state().parents.push(None);
        self.print(expr);
        self.state().parents.pop();
    }

    fn print_constant(&mut self, value: i64) {
        if value < 0 && self.state().parent().is_some() {
            let (open, close) = (self.open_paren(), self.close_paren());
            self.write(&format!("{open}{value}{close}"));
        } else {
            self.write(&value.to_string());
        }
    }

    fn print_sum(&mut self, addends: &[Arc<Expr>]) {
        for (i, addend) in addends.iter().enumerate() {
            if i == 0 {
                match addend.as_constant() {
                    Some(value) if value < 0 => self.write(&value.to_string()),
                    _ => self.print_child(addend, Operator::Addition),
                }
            } else if let Some(positive) = extract_negative(addend) {
                self.write(" - ");
                self.print_child(&positive, Operator::Addition);
            } else {
                self.write(" + ");
                self.print_child(addend, Operator::Addition);
            }
        }
    }

    fn print_product(&mut self, factors: &[Arc<Expr>]) {
        let mut rest = factors;
        if let Some(lead) = factors.first().and_then(|f| f.as_constant())
            && lead < 0
            && factors.len() > 1
        {
            if lead == -1 {
                self.write("-");
            } else {
                self.write(&lead.to_string());
                let separator = self.product_separator();
                self.write(separator);
            }
            rest = &factors[1..];
        }
        for (i, factor) in rest.iter().enumerate() {
            if i > 0 {
                let separator = self.product_separator();
                self.write(separator);
            }
            self.print_child(factor, Operator::Product);
        }
    }
}

/// Re-parseable plain text
pub(crate) struct PlainTextPrinter {
    state: PrintState,
}

impl PlainTextPrinter {
    pub fn new() -> Self {
        PlainTextPrinter {
            state: PrintState::new(),
        }
    }

    pub fn render(mut self, expr: &Expr) -> String {
        self.print(expr);
        self.finish()
    }
}

impl Printer for PlainTextPrinter {
    fn state(&mut self) -> &mut PrintState {
        &mut self.state
    }

    fn open_paren(&self) -> &'static str {
        "("
    }

    fn close_paren(&self) -> &'static str {
        ")"
    }

    fn product_separator(&self) -> &'static str {
        "*"
    }

    fn print_division(&mut self, numerator: &Expr, denominator: &Expr) {
        self.print_child(numerator, Operator::Division);
        self.write("/");
        self.print_child(denominator, Operator::Division);
    }

    fn print_power(&mut self, base: &Expr, exponent: &Expr) {
        self.print_child(base, Operator::Power);
        self.write("^");
        self.print_child(exponent, Operator::Power);
    }

    fn print_function(&mut self, function: Function, argument: &Expr) {
        self.write(function.name());
        self.write("(");
        self.print_grouped(argument);
        self.write(")");
    }
}

/// LaTeX math-mode source
pub(crate) struct LatexPrinter<'a> {
    state: PrintState,
    registry: &'a Registry,
}

impl<'a> LatexPrinter<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        LatexPrinter {
            state: PrintState::new(),
            registry,
        }
    }

    pub fn render(mut self, expr: &Expr) -> String {
        self.print(expr);
        self.finish()
    }
}

impl Printer for LatexPrinter<'_> {
    fn state(&mut self) -> &mut PrintState {
        &mut self.state
    }

    fn open_paren(&self) -> &'static str {
        r"\left("
    }

    fn close_paren(&self) -> &'static str {
        r"\right)"
    }

    fn product_separator(&self) -> &'static str {
        r" \cdot "
    }

    /// `\frac` delimits its own parts, so a fraction only needs wrapping as
    /// the base of a power
    fn needs_parentheses(&self, parent: Operator, current: Operator) -> bool {
        match current {
            Operator::Division => parent == Operator::Power,
            _ => parent.precedence() >= current.precedence(),
        }
    }

    fn print_variable(&mut self, name: &str) {
        match name {
            "pi" | "π" => self.write(r"\pi"),
            _ => self.write(name),
        }
    }

    fn print_division(&mut self, numerator: &Expr, denominator: &Expr) {
        self.write(r"\frac{");
        self.print_grouped(numerator);
        self.write("}{");
        self.print_grouped(denominator);
        self.write("}");
    }

    fn print_power(&mut self, base: &Expr, exponent: &Expr) {
        self.print_child(base, Operator::Power);
        self.write("^{");
        self.print_grouped(exponent);
        self.write("}");
    }

    fn print_function(&mut self, function: Function, argument: &Expr) {
        match self.registry.definition(function).latex {
            LatexForm::Command(command) => {
                self.write(command);
                self.write(r"\left(");
                self.print_grouped(argument);
                self.write(r"\right)");
            }
            LatexForm::Bars => {
                self.write(r"\left|");
                self.print_grouped(argument);
                self.write(r"\right|");
            }
            LatexForm::Radical => {
                self.write(r"\sqrt{");
                self.print_grouped(argument);
                self.write("}");
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PlainTextPrinter::new().render(self))
    }
}
