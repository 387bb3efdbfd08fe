//! Constrained time-formula language for continuous tracks.
//!
//! The entire grammar: numeric literals, the single variable `time`,
//! parentheses, unary `-`, the binary operators `+ - * / %`, and calls to
//! `sin`, `cos`, `abs`, `min`, `max`. Formulas compile to an AST up front;
//! evaluating a compiled formula cannot fail.

mod ast;
mod error;
mod formula;
mod lexer;
mod parser;

pub use ast::Function;
pub use error::FormulaError;
pub use formula::Formula;
