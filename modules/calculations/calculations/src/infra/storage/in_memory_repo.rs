//! In-memory repository, used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use calculations_sdk::Calculation;
use parking_lot::RwLock;

use crate::domain::repo::CalculationRepository;

/// Process-local calculation storage. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryCalculationRepository {
    rows: RwLock<HashMap<String, Calculation>>,
}

impl InMemoryCalculationRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalculationRepository for InMemoryCalculationRepository {
    async fn list(&self) -> anyhow::Result<Vec<Calculation>> {
        let mut items: Vec<Calculation> = self.rows.read().values().cloned().collect();
        items.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Calculation>> {
        Ok(self.rows.read().get(id).cloned())
    }

    async fn insert(&self, calculation: Calculation) -> anyhow::Result<Calculation> {
        let mut rows = self.rows.write();
        if rows.contains_key(&calculation.id) {
            anyhow::bail!("calculation {} already exists", calculation.id);
        }
        rows.insert(calculation.id.clone(), calculation.clone());
        Ok(calculation)
    }

    async fn update(&self, calculation: Calculation) -> anyhow::Result<Option<Calculation>> {
        let mut rows = self.rows.write();
        let Some(row) = rows.get_mut(&calculation.id) else {
            return Ok(None);
        };
        row.expression.clone_from(&calculation.expression);
        row.result.clone_from(&calculation.result);
        row.updated_at = calculation.updated_at;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.rows.write().remove(id).is_some())
    }
}
