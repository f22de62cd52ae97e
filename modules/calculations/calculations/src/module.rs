//! Module wiring: storage selection, migrations, service, REST routes.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use calculations_sdk::CalculationsApi;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use utoipa::OpenApi;

use crate::api::rest::routes::{self, ApiDoc};
use crate::config::CalculationsConfig;
use crate::domain::repo::CalculationRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{InMemoryCalculationRepository, SeaOrmCalculationRepository};
use crate::local_client::LocalClient;

/// The calculations module: owns the service and exposes it over REST and
/// through the SDK client.
pub struct CalculationsModule {
    service: Arc<Service>,
}

impl CalculationsModule {
    /// Build the module. With a database connection, pending migrations run
    /// first and records are stored there; without one, records live in memory.
    pub async fn init(
        config: &CalculationsConfig,
        db: Option<DatabaseConnection>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let repo: Arc<dyn CalculationRepository> = match db {
            Some(conn) => {
                Migrator::up(&conn, None)
                    .await
                    .context("failed to run calculations migrations")?;
                info!("Calculations storage: database");
                Arc::new(SeaOrmCalculationRepository::new(conn))
            }
            None => {
                info!("Calculations storage: in-memory");
                Arc::new(InMemoryCalculationRepository::new())
            }
        };

        Ok(Self::with_repository(repo, config))
    }

    #[must_use]
    pub fn with_repository(
        repo: Arc<dyn CalculationRepository>,
        config: &CalculationsConfig,
    ) -> Self {
        let service_config = ServiceConfig {
            limits: config.limits(),
        };
        Self {
            service: Arc::new(Service::new(repo, service_config)),
        }
    }

    /// In-process client sharing this module's service.
    #[must_use]
    pub fn client(&self) -> Arc<dyn CalculationsApi> {
        Arc::new(LocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: Router) -> Router {
        routes::register_routes(router, self.service.clone())
    }

    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
    }
}
