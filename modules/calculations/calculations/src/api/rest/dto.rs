//! REST DTOs for the calculations module.

use calculations_sdk::Calculation;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored calculation as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalculationDto {
    /// Unique identifier (UUID v4).
    #[schema(example = "9b2f3c1e-7d4a-4e8b-a1c5-0f6d2e3b4a59")]
    pub id: String,
    /// The expression as submitted.
    #[schema(example = "(3*4)-5")]
    pub expression: String,
    /// Canonical rendering of the evaluated expression.
    #[schema(example = "7")]
    pub result: String,
}

impl From<Calculation> for CalculationDto {
    fn from(c: Calculation) -> Self {
        Self {
            id: c.id,
            expression: c.expression,
            result: c.result,
        }
    }
}

/// Request body for creating or updating a calculation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CalculationRequest {
    /// Arithmetic expression to evaluate.
    #[schema(example = "3+4")]
    pub expression: String,
}
