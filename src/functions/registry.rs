use crate::ast::Operator;
use crate::functions::Function;
use crate::Expr;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// How a function is typeset in LaTeX
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LatexForm {
    /// Roman operator name followed by a parenthesized argument, e.g. `\sin`
    Command(&'static str),
    /// `\left| u \right|`
    Bars,
    /// `\sqrt{u}`
    Radical,
}

/// Definition of a built-in function including its evaluation and differentiation logic
#[derive(Clone)]
pub(crate) struct FunctionDefinition {
    pub function: Function,

    /// Extra names accepted by the parser
    pub aliases: &'static [&'static str],

    pub latex: LatexForm,

    /// Numerical evaluation function
    pub eval: fn(f64) -> f64,

    /// Outer derivative `f'(u)` for argument `u`
    pub derivative: fn(&Expr) -> Expr,
}

/// Named constants. They stay variables in the tree and are bound to their
/// values at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialConstant {
    Pi,
    E,
}

impl SpecialConstant {
    pub const ALL: [SpecialConstant; 2] = [SpecialConstant::Pi, SpecialConstant::E];

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            SpecialConstant::Pi => "pi",
            SpecialConstant::E => "e",
        }
    }

    /// Every spelling the parser produces for this constant
    pub fn names(self) -> &'static [&'static str] {
        match self {
            SpecialConstant::Pi => &["pi", "π"],
            SpecialConstant::E => &["e"],
        }
    }

    pub fn value(self) -> f64 {
        match self {
            SpecialConstant::Pi => std::f64::consts::PI,
            SpecialConstant::E => std::f64::consts::E,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SpecialConstant::ALL
            .into_iter()
            .find(|c| c.names().iter().any(|n| *n == name))
    }
}

/// Immutable catalog of operator symbols, function names and constants.
///
/// Built once and handed to every component by reference.
pub struct Registry {
    operators: FxHashMap<&'static str, Operator>,
    functions: FxHashMap<&'static str, Function>,
    definitions: Vec<FunctionDefinition>,
    constants: FxHashMap<&'static str, SpecialConstant>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("operators", &self.operators.len())
            .field("functions", &self.functions.len())
            .field("constants", &self.constants.len())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

static STANDARD: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// The shared standard registry, built on first use
    pub fn standard() -> &'static Registry {
        STANDARD.get_or_init(Registry::new)
    }

    /// A fresh catalog with the standard operators, functions and constants
    pub fn new() -> Registry {
        let operators = [
            Operator::Addition,
            Operator::Subtraction,
            Operator::Product,
            Operator::Division,
            Operator::Power,
        ]
        .into_iter()
        .map(|op| (op.symbol(), op))
        .collect();

        let definitions = crate::functions::definitions::all_definitions();
        let mut functions = FxHashMap::default();
        for def in &definitions {
            functions.insert(def.function.name(), def.function);
            for alias in def.aliases {
                functions.insert(*alias, def.function);
            }
        }

        let mut constants = FxHashMap::default();
        for constant in SpecialConstant::ALL {
            for name in constant.names() {
                constants.insert(*name, constant);
            }
        }

        Registry {
            operators,
            functions,
            definitions,
            constants,
        }
    }

    pub fn operator(&self, symbol: &str) -> Option<Operator> {
        self.operators.get(symbol).copied()
    }

    pub fn function(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    pub(crate) fn definition(&self, function: Function) -> &FunctionDefinition {
        &self.definitions[function.index()]
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    /// Every constant spelling with its numeric value
    pub fn constant_values(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.constants.iter().map(|(name, c)| (*name, c.value()))
    }
}
