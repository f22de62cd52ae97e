//! Domain error types for the calculations module.

use calc_expression::ExpressionError;
use calculations_sdk::CalculationsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Invalid expression: {0}")]
    InvalidExpression(#[from] ExpressionError),

    #[error("Calculation not found: {id}")]
    NotFound { id: String },

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

impl From<DomainError> for CalculationsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => {
                CalculationsError::invalid_request(format!("{field}: {message}"))
            }
            DomainError::InvalidExpression(err) => {
                CalculationsError::invalid_expression(err.to_string())
            }
            DomainError::NotFound { .. } => CalculationsError::not_found(),
            DomainError::Database(err) => {
                tracing::error!(error = ?err, "Database error in calculations");
                CalculationsError::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_expression::{EvaluationError, ParseError};

    #[test]
    fn test_error_display() {
        let err = DomainError::validation("expression", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Validation error on field 'expression': must not be empty"
        );

        let err = DomainError::not_found("abc");
        assert_eq!(err.to_string(), "Calculation not found: abc");

        let err: DomainError = ExpressionError::from(EvaluationError::DivisionByZero).into();
        assert_eq!(
            err.to_string(),
            "Invalid expression: evaluation error: division by zero"
        );
    }

    #[test]
    fn test_domain_to_sdk_error_conversion() {
        let sdk: CalculationsError = DomainError::not_found("abc").into();
        assert_eq!(sdk, CalculationsError::NotFound);

        let sdk: CalculationsError =
            DomainError::InvalidExpression(ParseError::UnexpectedEnd.into()).into();
        assert_eq!(
            sdk,
            CalculationsError::invalid_expression("parse error: unexpected end of expression")
        );

        let sdk: CalculationsError = DomainError::validation("expression", "empty").into();
        assert!(matches!(sdk, CalculationsError::InvalidRequest { .. }));

        let sdk: CalculationsError = DomainError::Database(anyhow::anyhow!("boom")).into();
        assert_eq!(sdk, CalculationsError::Internal);
    }
}
