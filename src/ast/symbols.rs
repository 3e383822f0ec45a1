//! The fixed vocabulary of the expression language.
//!
//! Names are resolved against [`VOCABULARY`], a static table built at compile
//! time. Nothing can be added to it at runtime.

use std::fmt;

/// Named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// `pi`
    Pi,
    /// `e`, base of the natural logarithm
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }
}

/// Built-in function of one real argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Exp,
    /// Natural logarithm
    Log,
    Sqrt,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Exp => "exp",
            Function::Log => "log",
            Function::Sqrt => "sqrt",
        }
    }
}

/// What a name in the source text refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// The independent variable `x`
    Variable,
    Constant(Constant),
    Function(Function),
}

impl Symbol {
    /// Looks a name up in [`VOCABULARY`].
    ///
    /// ```
    /// use numint::ast::{Function, Symbol};
    ///
    /// assert_eq!(Symbol::lookup("sqrt"), Some(Symbol::Function(Function::Sqrt)));
    /// assert_eq!(Symbol::lookup("xsin"), None);
    /// ```
    pub fn lookup(name: &str) -> Option<Symbol> {
        VOCABULARY
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, symbol)| *symbol)
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Variable => "x",
            Symbol::Constant(c) => c.name(),
            Symbol::Function(f) => f.name(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every name the lexer accepts.
pub static VOCABULARY: [(&str, Symbol); 9] = [
    ("x", Symbol::Variable),
    ("pi", Symbol::Constant(Constant::Pi)),
    ("e", Symbol::Constant(Constant::E)),
    ("sin", Symbol::Function(Function::Sin)),
    ("cos", Symbol::Function(Function::Cos)),
    ("tan", Symbol::Function(Function::Tan)),
    ("exp", Symbol::Function(Function::Exp)),
    ("log", Symbol::Function(Function::Log)),
    ("sqrt", Symbol::Function(Function::Sqrt)),
];
