//! Expression error types

use thiserror::Error;

use crate::ast::{BinaryOp, UnaryOp};

/// Syntax errors, detected before anything is evaluated.
///
/// Positions are byte offsets into the input string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("expression exceeds maximum length of {max} bytes")]
    TooLong { max: usize },

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number literal '{literal}' at position {pos}")]
    InvalidNumber { literal: String, pos: usize },

    #[error("unterminated string literal starting at position {pos}")]
    UnterminatedString { pos: usize },

    #[error("unexpected token '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbalanced parentheses: '(' at position {pos} is never closed")]
    UnclosedParen { pos: usize },

    #[error("unknown identifier '{name}' at position {pos}: variables and functions are not supported")]
    UnknownIdentifier { name: String, pos: usize },

    #[error("expression nesting exceeds maximum depth of {max}")]
    TooDeep { max: usize },
}

/// Runtime errors raised while evaluating a well-formed expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("cannot apply operator '{op}' to {left} and {right}")]
    TypeMismatch {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },

    #[error("cannot apply operator '{op}' to {operand}")]
    UnaryTypeMismatch { op: UnaryOp, operand: &'static str },

    #[error("operator '{op}' requires boolean operands, found {found}")]
    NonBooleanOperand { op: BinaryOp, found: &'static str },

    #[error("ternary condition must be boolean, found {found}")]
    NonBooleanCondition { found: &'static str },

    #[error("shift amount {amount} is out of range 0..64")]
    ShiftOutOfRange { amount: i64 },

    #[error("value {value} does not fit in a 64-bit integer")]
    IntegerOutOfRange { value: String },

    #[error("result is not a finite number")]
    NonFinite,
}

/// Any failure produced by [`crate::Evaluator::evaluate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl ExpressionError {
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    #[must_use]
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Self::Evaluation(_))
    }
}
