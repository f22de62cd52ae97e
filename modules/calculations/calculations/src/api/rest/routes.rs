use std::sync::Arc;

use axum::routing::{get, patch};
use axum::{Extension, Router};
use calc_errors::Problem;
use utoipa::OpenApi;

use crate::domain::service::Service;

use super::dto::{CalculationDto, CalculationRequest};
use super::handlers;

pub const CALCULATIONS_PATH: &str = "/calculations";
pub const CALCULATION_PATH: &str = "/calculations/{id}";

#[derive(OpenApi)]
#[openapi(
    info(title = "Calculator API", description = "Evaluate and store arithmetic expressions"),
    paths(
        handlers::list_calculations,
        handlers::create_calculation,
        handlers::patch_calculation,
        handlers::delete_calculation,
    ),
    components(schemas(CalculationDto, CalculationRequest, Problem)),
    tags((name = "calculations", description = "Calculation records"))
)]
pub struct ApiDoc;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let routes = Router::new()
        .route(
            CALCULATIONS_PATH,
            get(handlers::list_calculations).post(handlers::create_calculation),
        )
        .route(
            CALCULATION_PATH,
            patch(handlers::patch_calculation).delete(handlers::delete_calculation),
        )
        .layer(Extension(service));

    router.merge(routes)
}
