//! Error types for the calculations SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationsError {
    #[error("Calculation not found")]
    NotFound,

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Invalid expression: {message}")]
    InvalidExpression { message: String },

    #[error("Internal error")]
    Internal,
}

impl CalculationsError {
    #[must_use]
    pub fn not_found() -> Self {
        Self::NotFound
    }

    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_expression(message: impl Into<String>) -> Self {
        Self::InvalidExpression {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
