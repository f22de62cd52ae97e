use std::sync::Arc;

use async_trait::async_trait;
use calculations_sdk::{Calculation, CalculationsApi, CalculationsError};

use crate::domain::service::Service;

/// In-process `CalculationsApi` backed by the domain service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalculationsApi for LocalClient {
    async fn list(&self) -> Result<Vec<Calculation>, CalculationsError> {
        self.service.list().await.map_err(Into::into)
    }

    async fn create(&self, expression: String) -> Result<Calculation, CalculationsError> {
        self.service.create(expression).await.map_err(Into::into)
    }

    async fn update(
        &self,
        id: &str,
        expression: String,
    ) -> Result<Calculation, CalculationsError> {
        self.service
            .update(id, expression)
            .await
            .map_err(Into::into)
    }

    async fn delete(&self, id: &str) -> Result<(), CalculationsError> {
        self.service.delete(id).await.map_err(Into::into)
    }
}
