//! Arithmetic and logical expression evaluation for the calculator backend.
//!
//! Expressions are parsed into an [`Expr`] tree and evaluated to a [`Value`].
//! Only literals are supported: numbers, single- or double-quoted strings and
//! `true` / `false`. Names such as `x` or `sqrt` are rejected at parse time.
//!
//! ```
//! let result = calc_expression::evaluate("(3 * 4) - 5").unwrap();
//! assert_eq!(result, "7");
//! ```

pub mod ast;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::{EvaluationError, ExpressionError, ParseError};
pub use eval::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_LENGTH, Evaluator, Limits, MAX_DEPTH_CEILING, MAX_LENGTH_CEILING,
};
pub use parser::parse;
pub use value::Value;

/// Evaluate `input` with default [`Limits`] and render the result canonically.
pub fn evaluate(input: &str) -> Result<String, ExpressionError> {
    Evaluator::default().evaluate_to_string(input)
}
