//! Compiler for scalar expressions of one variable `t`.
//!
//! Expressions use a closed grammar: numeric literals, `t`, the constants
//! `pi` and `e`, the operators `+ - * / ^` (`**` is accepted for `^`),
//! parentheses and an allow-list of math functions. Function names and the
//! constants `PI` / `E` may carry a `Math.` prefix. Anything else, or
//! nesting past [`MAX_NESTING`] parentheses or [`MAX_DEPTH`] tree levels, is
//! a [`CompileError`].
//!
//! The grammar lives in `formula.pest`; the allow-list and arity checks are
//! applied while the syntax tree is built from it.

mod ast;
mod parser;

pub use ast::{Arity, BinaryOp, Expr, Function};
pub use parser::{MAX_DEPTH, MAX_NESTING, VARIABLE};

use std::fmt;
use std::sync::Arc;

use crate::error::{CompileError, EvaluationFault};

/// Compiles `source` into an evaluable function of `t`.
///
/// # Errors
///
/// Returns a [`CompileError`] carrying the source text, a reason and the
/// byte offset if the expression is malformed or uses a name outside the
/// allow-list.
pub fn compile(source: &str) -> Result<CompiledFunction, CompileError> {
    let expr = parser::parse(source)?;
    tracing::debug!(expression = source, "compiled expression");
    Ok(CompiledFunction {
        source: Arc::from(source),
        expr: Arc::new(expr),
    })
}

/// A compiled scalar function `f(t)`.
///
/// Cheap to clone; evaluation is pure and deterministic.
#[derive(Clone)]
pub struct CompiledFunction {
    source: Arc<str>,
    expr: Arc<Expr>,
}

impl CompiledFunction {
    /// Evaluates the function at `t`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationFault`] on division by zero, a domain error or a
    /// non-finite result.
    pub fn evaluate(&self, t: f64) -> Result<f64, EvaluationFault> {
        self.expr.evaluate(t)
    }

    /// Returns the source text the function was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the parsed syntax tree.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl fmt::Debug for CompiledFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledFunction").field(&self.source).finish()
    }
}
