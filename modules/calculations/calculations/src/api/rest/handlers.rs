use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::http::{StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::Json;
use calc_errors::Problem;
use tracing::info;

use crate::domain::service::Service;

use super::dto::{CalculationDto, CalculationRequest};
use super::error::{domain_error_to_problem, json_rejection_to_problem};

pub type ApiResult<T> = Result<T, Problem>;

fn parse_body(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
    uri: &Uri,
) -> ApiResult<CalculationRequest> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| json_rejection_to_problem(&rejection, uri.path()))
}

/// List all calculations
#[utoipa::path(
    get,
    path = "/calculations",
    tag = "calculations",
    responses(
        (status = 200, description = "All stored calculations", body = [CalculationDto]),
        (status = 500, description = "Storage failure", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip(svc, uri))]
pub async fn list_calculations(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<CalculationDto>>> {
    let items = svc
        .list()
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(Json(items.into_iter().map(CalculationDto::from).collect()))
}

/// Evaluate an expression and store the calculation
#[utoipa::path(
    post,
    path = "/calculations",
    tag = "calculations",
    request_body = CalculationRequest,
    responses(
        (status = 201, description = "Calculation created", body = CalculationDto),
        (status = 400, description = "Invalid request or expression", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Storage failure", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip(svc, uri, payload))]
pub async fn create_calculation(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let req = parse_body(payload, &uri)?;
    info!(expression = %req.expression, "Creating calculation");

    let calculation = svc
        .create(req.expression)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), calculation.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CalculationDto::from(calculation)),
    ))
}

/// Replace the expression of an existing calculation
#[utoipa::path(
    patch,
    path = "/calculations/{id}",
    tag = "calculations",
    params(("id" = String, Path, description = "Calculation id")),
    request_body = CalculationRequest,
    responses(
        (status = 200, description = "Calculation updated", body = CalculationDto),
        (status = 400, description = "Invalid request or expression", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Calculation not found", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Storage failure", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip(svc, uri, payload), fields(calculation.id = %id))]
pub async fn patch_calculation(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<Json<CalculationDto>> {
    let req = parse_body(payload, &uri)?;
    info!(calculation_id = %id, expression = %req.expression, "Updating calculation");

    let calculation = svc
        .update(&id, req.expression)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(Json(CalculationDto::from(calculation)))
}

/// Delete a calculation; unknown ids are ignored
#[utoipa::path(
    delete,
    path = "/calculations/{id}",
    tag = "calculations",
    params(("id" = String, Path, description = "Calculation id")),
    responses(
        (status = 204, description = "Calculation deleted"),
        (status = 500, description = "Storage failure", body = Problem, content_type = "application/problem+json"),
    )
)]
#[tracing::instrument(skip(svc, uri), fields(calculation.id = %id))]
pub async fn delete_calculation(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    info!(calculation_id = %id, "Deleting calculation");

    svc.delete(&id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::ServiceConfig;
    use crate::infra::storage::InMemoryCalculationRepository;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{get, patch};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt as _;

    fn create_test_service() -> Arc<Service> {
        let repo = Arc::new(InMemoryCalculationRepository::new());
        Arc::new(Service::new(repo, ServiceConfig::default()))
    }

    fn create_test_router(service: Arc<Service>) -> Router {
        Router::new()
            .route(
                "/calculations",
                get(list_calculations).post(create_calculation),
            )
            .route(
                "/calculations/{id}",
                patch(patch_calculation).delete(delete_calculation),
            )
            .layer(Extension(service))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_calculation_returns_201() {
        let app = create_test_router(create_test_service());

        let response = app
            .oneshot(json_request("POST", "/calculations", r#"{"expression":"3+4"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let location = response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_owned();
        let json = body_json(response).await;
        assert_eq!(json["expression"], "3+4");
        assert_eq!(json["result"], "7");
        assert_eq!(location, format!("/calculations/{}", json["id"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn test_create_with_invalid_expression_returns_problem() {
        let app = create_test_router(create_test_service());

        let response = app
            .oneshot(json_request("POST", "/calculations", r#"{"expression":"1/0"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            calc_errors::APPLICATION_PROBLEM_JSON
        );

        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid expression");
        assert_eq!(json["status"], 400);
        assert_eq!(json["instance"], "/calculations");
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_request() {
        let service = create_test_service();

        for body in [r#"{"expression":"#, r#"{}"#, r#"{"expression":42}"#, "[]"] {
            let app = create_test_router(service.clone());
            let response = app
                .oneshot(json_request("POST", "/calculations", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            let json = body_json(response).await;
            assert_eq!(json["error"], "Invalid request");
        }

        let items = service.list().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_invalid_request() {
        let app = create_test_router(create_test_service());
        let request = Request::builder()
            .method("POST")
            .uri("/calculations")
            .body(Body::from(r#"{"expression":"1+1"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_returns_created_items() {
        let service = create_test_service();
        service.create("1+1".to_owned()).await.unwrap();
        service.create("2*3".to_owned()).await.unwrap();
        let app = create_test_router(service);

        let request = Request::builder()
            .uri("/calculations")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.get("created_at").is_none()));
    }

    #[tokio::test]
    async fn test_patch_updates_result() {
        let service = create_test_service();
        let created = service.create("1+1".to_owned()).await.unwrap();
        let app = create_test_router(service);

        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/calculations/{}", created.id),
                r#"{"expression":"(3*4)-5"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["id"], created.id.as_str());
        assert_eq!(json["result"], "7");
    }

    #[tokio::test]
    async fn test_patch_unknown_id_returns_404() {
        let service = create_test_service();
        let app = create_test_router(service.clone());

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/calculations/does-not-exist",
                r#"{"expression":"1+1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Calculation not found");
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_204_even_when_missing() {
        let service = create_test_service();
        let created = service.create("1+1".to_owned()).await.unwrap();

        for _ in 0..2 {
            let app = create_test_router(service.clone());
            let request = Request::builder()
                .method("DELETE")
                .uri(format!("/calculations/{}", created.id))
                .body(Body::empty())
                .unwrap();
            let response = app.oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }

        assert!(service.list().await.unwrap().is_empty());
    }
}
