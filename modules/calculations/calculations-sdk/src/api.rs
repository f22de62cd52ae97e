//! `CalculationsApi` trait definition.

use async_trait::async_trait;

use crate::errors::CalculationsError;
use crate::models::Calculation;

/// Public API of the calculations module.
///
/// Obtained from `CalculationsModule::client()`; every call goes through the
/// same domain service as the REST handlers.
#[async_trait]
pub trait CalculationsApi: Send + Sync {
    /// All stored calculations, oldest first.
    async fn list(&self) -> Result<Vec<Calculation>, CalculationsError>;

    /// Evaluate `expression` and store it. Nothing is stored on failure.
    async fn create(&self, expression: String) -> Result<Calculation, CalculationsError>;

    /// Re-evaluate and replace the expression of an existing calculation.
    async fn update(
        &self,
        id: &str,
        expression: String,
    ) -> Result<Calculation, CalculationsError>;

    /// Remove a calculation. Deleting an unknown id succeeds.
    async fn delete(&self, id: &str) -> Result<(), CalculationsError>;
}
