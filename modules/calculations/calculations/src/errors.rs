//! Error catalog for the calculations module.

use calc_errors::ErrDef;

/// Catalog entries used when mapping domain errors to problem responses.
pub struct ErrorCode;

impl ErrorCode {
    #[must_use]
    pub const fn calculations_invalid_request() -> ErrDef {
        ErrDef {
            status: 400,
            title: "Invalid request",
            code: "calculations.invalid_request",
            type_url: "https://errors.calculator.local/calculations.invalid_request",
        }
    }

    #[must_use]
    pub const fn calculations_invalid_expression() -> ErrDef {
        ErrDef {
            status: 400,
            title: "Invalid expression",
            code: "calculations.invalid_expression",
            type_url: "https://errors.calculator.local/calculations.invalid_expression",
        }
    }

    #[must_use]
    pub const fn calculations_not_found() -> ErrDef {
        ErrDef {
            status: 404,
            title: "Calculation not found",
            code: "calculations.not_found",
            type_url: "https://errors.calculator.local/calculations.not_found",
        }
    }

    #[must_use]
    pub const fn calculations_internal() -> ErrDef {
        ErrDef {
            status: 500,
            title: "Internal error",
            code: "calculations.internal",
            type_url: "https://errors.calculator.local/calculations.internal",
        }
    }
}
