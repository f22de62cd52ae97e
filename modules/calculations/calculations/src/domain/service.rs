use std::sync::Arc;

use calc_expression::{Evaluator, Limits};
use calculations_sdk::Calculation;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::error::DomainError;
use super::repo::CalculationRepository;

// ============================================================================
// Service Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceConfig {
    pub limits: Limits,
}

// ============================================================================
// Service Implementation
// ============================================================================

pub struct Service {
    repo: Arc<dyn CalculationRepository>,
    evaluator: Evaluator,
}

impl Service {
    pub fn new(repo: Arc<dyn CalculationRepository>, config: ServiceConfig) -> Self {
        Self {
            repo,
            evaluator: Evaluator::new(config.limits),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Calculation>, DomainError> {
        let items = self.repo.list().await?;
        debug!("Listed {} calculations", items.len());
        Ok(items)
    }

    #[instrument(skip(self, expression))]
    pub async fn create(&self, expression: String) -> Result<Calculation, DomainError> {
        let result = self.evaluate(&expression)?;

        let now = Utc::now();
        let calculation = Calculation {
            id: Uuid::new_v4().to_string(),
            expression,
            result,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repo.insert(calculation).await?;
        info!(calculation_id = %stored.id, result = %stored.result, "Created calculation");
        Ok(stored)
    }

    /// Replace the expression of an existing calculation.
    ///
    /// The id is resolved first, so an unknown id reports `NotFound` even when
    /// the new expression is also invalid.
    #[instrument(skip(self, id, expression), fields(calculation_id = %id))]
    pub async fn update(&self, id: &str, expression: String) -> Result<Calculation, DomainError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))?;

        let result = self.evaluate(&expression)?;
        let updated = Calculation {
            expression,
            result,
            updated_at: Utc::now(),
            ..existing
        };

        let stored = self
            .repo
            .update(updated)
            .await?
            .ok_or_else(|| DomainError::not_found(id))?;
        info!(calculation_id = %stored.id, result = %stored.result, "Updated calculation");
        Ok(stored)
    }

    /// Idempotent: deleting an unknown id is not an error.
    #[instrument(skip(self, id), fields(calculation_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        if self.repo.delete(id).await? {
            info!("Deleted calculation");
        } else {
            debug!("Delete of unknown calculation ignored");
        }
        Ok(())
    }

    fn evaluate(&self, expression: &str) -> Result<String, DomainError> {
        if expression.trim().is_empty() {
            return Err(DomainError::validation("expression", "must not be empty"));
        }

        let result = self.evaluator.evaluate_to_string(expression).map_err(|e| {
            debug!(error = %e, "Expression rejected");
            DomainError::from(e)
        })?;
        Ok(result)
    }
}
