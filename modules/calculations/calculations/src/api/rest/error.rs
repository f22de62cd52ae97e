use axum::extract::rejection::JsonRejection;
use calc_errors::Problem;

use crate::domain::error::DomainError;
use crate::errors::ErrorCode;

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

/// Map domain error to a Problem using the error catalog
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();

    match e {
        DomainError::Validation { field, message } => ErrorCode::calculations_invalid_request()
            .with_context(format!("{field} {message}"), instance, trace_id),
        DomainError::InvalidExpression(err) => ErrorCode::calculations_invalid_expression()
            .with_context(err.to_string(), instance, trace_id),
        DomainError::NotFound { id } => ErrorCode::calculations_not_found().with_context(
            format!("Calculation with id {id} was not found"),
            instance,
            trace_id,
        ),
        DomainError::Database(_) => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ErrorCode::calculations_internal().with_context(
                "Could not access calculation storage",
                instance,
                trace_id,
            )
        }
    }
}

/// Malformed or incomplete JSON bodies are reported as invalid requests.
pub fn json_rejection_to_problem(rejection: &JsonRejection, instance: &str) -> Problem {
    ErrorCode::calculations_invalid_request().with_context(
        rejection.body_text(),
        instance,
        current_trace_id(),
    )
}
