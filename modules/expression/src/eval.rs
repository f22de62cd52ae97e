//! Tree-walking evaluator

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{EvaluationError, ExpressionError, ParseError};
use crate::parser::parse;
use crate::value::Value;

pub const DEFAULT_MAX_LENGTH: usize = 1024;
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Largest `max_length` a deployment may configure.
pub const MAX_LENGTH_CEILING: usize = 64 * 1024;
/// Largest `max_depth` a deployment may configure; nesting recurses.
pub const MAX_DEPTH_CEILING: usize = 128;

/// Input bounds applied before and during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum expression length in bytes.
    pub max_length: usize,
    /// Maximum nesting of parentheses, prefix operators and ternaries.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses and evaluates expressions under fixed [`Limits`].
///
/// Stateless apart from its limits; evaluating the same input twice
/// always yields the same outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    limits: Limits,
}

impl Evaluator {
    #[must_use]
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn parse(&self, input: &str) -> Result<Expr, ParseError> {
        parse(input, &self.limits)
    }

    pub fn evaluate(&self, input: &str) -> Result<Value, ExpressionError> {
        let expr = self.parse(input)?;
        Ok(expr.evaluate()?)
    }

    /// Evaluate and render the result canonically.
    pub fn evaluate_to_string(&self, input: &str) -> Result<String, ExpressionError> {
        self.evaluate(input).map(|v| v.to_string())
    }
}

impl Expr {
    pub fn evaluate(&self) -> Result<Value, EvaluationError> {
        match self {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Unary { op, operand } => unary(*op, operand.evaluate()?),
            Expr::Binary { .. } => evaluate_chain(self),
            Expr::Conditional {
                condition,
                then,
                otherwise,
            } => match condition.evaluate()? {
                Value::Bool(true) => then.evaluate(),
                Value::Bool(false) => otherwise.evaluate(),
                other => Err(EvaluationError::NonBooleanCondition {
                    found: other.type_name(),
                }),
            },
        }
    }
}

/// Evaluate a left-nested run of binary operators (`a + b - c * d ...`)
/// with a loop, so long operator chains do not recurse once per operator.
fn evaluate_chain(expr: &Expr) -> Result<Value, EvaluationError> {
    let mut pending: Vec<(BinaryOp, &Expr)> = Vec::new();
    let mut node = expr;
    while let Expr::Binary { op, lhs, rhs } = node {
        pending.push((*op, &**rhs));
        node = &**lhs;
    }

    let mut acc = node.evaluate()?;
    while let Some((op, rhs)) = pending.pop() {
        acc = match op {
            BinaryOp::And => {
                if logical_operand(op, &acc)? {
                    Value::Bool(logical_operand(op, &rhs.evaluate()?)?)
                } else {
                    Value::Bool(false)
                }
            }
            BinaryOp::Or => {
                if logical_operand(op, &acc)? {
                    Value::Bool(true)
                } else {
                    Value::Bool(logical_operand(op, &rhs.evaluate()?)?)
                }
            }
            _ => binary(op, &acc, &rhs.evaluate()?)?,
        };
    }
    Ok(acc)
}

fn logical_operand(op: BinaryOp, value: &Value) -> Result<bool, EvaluationError> {
    value
        .as_bool()
        .ok_or(EvaluationError::NonBooleanOperand {
            op,
            found: value.type_name(),
        })
}

fn finite(n: f64) -> Result<Value, EvaluationError> {
    if n.is_finite() {
        Ok(Value::Number(n))
    } else {
        Err(EvaluationError::NonFinite)
    }
}

/// Truncate toward zero and check the result fits in `i64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn to_integer(n: f64) -> Result<i64, EvaluationError> {
    let t = n.trunc();
    // i64::MAX is not representable; 2^63 is the first value out of range.
    if t >= -(i64::MIN as f64) || t < i64::MIN as f64 {
        return Err(EvaluationError::IntegerOutOfRange {
            value: Value::Number(n).to_string(),
        });
    }
    Ok(t as i64)
}

#[allow(clippy::cast_precision_loss)]
fn from_integer(i: i64) -> Value {
    Value::Number(i as f64)
}

fn unary(op: UnaryOp, value: Value) -> Result<Value, EvaluationError> {
    match (op, value) {
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(n)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::BitNot, Value::Number(n)) => Ok(from_integer(!to_integer(n)?)),
        (op, other) => Err(EvaluationError::UnaryTypeMismatch {
            op,
            operand: other.type_name(),
        }),
    }
}

fn binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, EvaluationError> {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(lhs == rhs)),
        BinaryOp::Ne => return Ok(Value::Bool(lhs != rhs)),
        BinaryOp::Add => {
            if let (Value::Text(_), _) | (_, Value::Text(_)) = (lhs, rhs) {
                return Ok(Value::Text(format!("{lhs}{rhs}")));
            }
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            return compare(op, lhs, rhs);
        }
        _ => {}
    }

    let (Value::Number(a), Value::Number(b)) = (lhs, rhs) else {
        return Err(EvaluationError::TypeMismatch {
            op,
            left: lhs.type_name(),
            right: rhs.type_name(),
        });
    };
    let (a, b) = (*a, *b);

    match op {
        BinaryOp::Add => finite(a + b),
        BinaryOp::Sub => finite(a - b),
        BinaryOp::Mul => finite(a * b),
        BinaryOp::Div | BinaryOp::Rem if b == 0.0 => Err(EvaluationError::DivisionByZero),
        BinaryOp::Div => finite(a / b),
        BinaryOp::Rem => finite(a % b),
        BinaryOp::Pow => finite(a.powf(b)),
        BinaryOp::BitAnd => Ok(from_integer(to_integer(a)? & to_integer(b)?)),
        BinaryOp::BitOr => Ok(from_integer(to_integer(a)? | to_integer(b)?)),
        BinaryOp::BitXor => Ok(from_integer(to_integer(a)? ^ to_integer(b)?)),
        BinaryOp::Shl | BinaryOp::Shr => shift(op, to_integer(a)?, to_integer(b)?),
        // Handled above.
        BinaryOp::Eq
        | BinaryOp::Ne
        | BinaryOp::Lt
        | BinaryOp::Le
        | BinaryOp::Gt
        | BinaryOp::Ge
        | BinaryOp::And
        | BinaryOp::Or => Err(EvaluationError::TypeMismatch {
            op,
            left: "number",
            right: "number",
        }),
    }
}

fn shift(op: BinaryOp, value: i64, amount: i64) -> Result<Value, EvaluationError> {
    let bits = u32::try_from(amount)
        .ok()
        .filter(|bits| *bits < i64::BITS)
        .ok_or(EvaluationError::ShiftOutOfRange { amount })?;
    let shifted = if op == BinaryOp::Shl {
        value.wrapping_shl(bits)
    } else {
        value >> bits
    };
    Ok(from_integer(shifted))
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, EvaluationError> {
    let ordering = match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => {
            return Err(EvaluationError::TypeMismatch {
                op,
                left: lhs.type_name(),
                right: rhs.type_name(),
            });
        }
    };

    let result = ordering.is_some_and(|ord| match op {
        BinaryOp::Lt => ord.is_lt(),
        BinaryOp::Le => ord.is_le(),
        BinaryOp::Gt => ord.is_gt(),
        _ => ord.is_ge(),
    });
    Ok(Value::Bool(result))
}
