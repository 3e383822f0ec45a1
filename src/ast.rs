//! # Expression Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the single-variable
//! formula language accepted by the integrator.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, variable, calls, operations)
//! - **[operators]** - Binary arithmetic operators
//! - **[symbols]** - The fixed vocabulary of constants and functions
//!
//! ## Quick Start
//!
//! ```text
//! 2x^2 + 3sin(x) - e
//! ```
//!
//! This formula reads as `2*x^2 + 3*sin(x) - e`.
//!
//! ## Core Concepts
//!
//! ### Vocabulary
//!
//! The language is closed. The only names it knows are:
//!
//! - **Variable** `x` - the independent variable
//! - **Constants** `pi`, `e`
//! - **Functions** `sin`, `cos`, `tan`, `exp`, `log` (natural), `sqrt`
//!
//! Any other identifier is rejected while lexing.
//!
//! ### Precedence
//!
//! From lowest to highest:
//!
//! - `+`, `-` (left-associative)
//! - `*`, `/` (left-associative, including implicit multiplication)
//! - `^` or `**` (right-associative)
//! - unary `-`
//!
//! Unary minus binds tighter than `^`, so `-x^2` is `(-x)^2`.
//!
//! ### Implicit Multiplication
//!
//! A number directly followed by a name or `(` multiplies:
//!
//! ```text
//! 2x      // 2*x
//! 3sin(x) // 3*sin(x)
//! 4(x+1)  // 4*(x+1)
//! ```
pub mod tokens;
pub mod expressions;
pub mod operators;
pub mod symbols;

pub use tokens::Token;
pub use expressions::Expr;
pub use operators::BinOp;
pub use symbols::{Constant, Function, Symbol};
