//! Public models for the calculations module.
//!
//! Transport-agnostic; the REST layer maps these to its own DTOs.

use chrono::{DateTime, Utc};

/// A stored expression together with its evaluated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    /// Hyphenated UUID v4, assigned on creation.
    pub id: String,
    pub expression: String,
    /// Canonical rendering of the evaluated expression.
    pub result: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
