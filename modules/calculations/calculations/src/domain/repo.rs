use async_trait::async_trait;
use calculations_sdk::Calculation;

/// Persistence port for calculations.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// All calculations ordered by creation time, then id.
    async fn list(&self) -> anyhow::Result<Vec<Calculation>>;

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Calculation>>;

    async fn insert(&self, calculation: Calculation) -> anyhow::Result<Calculation>;

    /// Overwrite expression, result and `updated_at` of an existing record.
    /// Returns `None` if no record has the given id.
    async fn update(&self, calculation: Calculation) -> anyhow::Result<Option<Calculation>>;

    /// Returns `true` if a record was removed.
    async fn delete(&self, id: &str) -> anyhow::Result<bool>;
}
