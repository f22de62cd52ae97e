#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end REST tests against SeaORM on in-memory SQLite.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use calculations::{CalculationsConfig, CalculationsModule};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use tower::ServiceExt as _;

async fn sqlite_memory() -> DatabaseConnection {
    // One connection, kept alive: every new in-memory connection is a fresh database.
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .idle_timeout(Duration::from_secs(3600))
        .sqlx_logging(false);
    Database::connect(opts).await.expect("connect to sqlite")
}

async fn test_app() -> (Router, CalculationsModule) {
    let db = sqlite_memory().await;
    let module = CalculationsModule::init(&CalculationsConfig::default(), Some(db))
        .await
        .expect("module init");
    let router = module.register_rest(Router::new());
    (router, module)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn create_list_update_delete_lifecycle() {
    let (app, _module) = test_app().await;

    let (status, created) =
        send(&app, "POST", "/calculations", Some(json!({"expression": "3+4"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["expression"], "3+4");
    assert_eq!(created["result"], "7");
    let id = created["id"].as_str().unwrap().to_owned();
    assert!(uuid::Uuid::parse_str(&id).is_ok());

    let (status, list) = send(&app, "GET", "/calculations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([created]));

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/calculations/{id}"),
        Some(json!({"expression": "(3*4)-5"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"id": id, "expression": "(3*4)-5", "result": "7"})
    );

    let (status, _) = send(&app, "DELETE", &format!("/calculations/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, "GET", "/calculations", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn failed_evaluations_are_never_stored() {
    let (app, _module) = test_app().await;

    for expression in ["2+", "(2+3", "1/0"] {
        let (status, problem) = send(
            &app,
            "POST",
            "/calculations",
            Some(json!({"expression": expression})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{expression}");
        assert_eq!(problem["error"], "Invalid expression");
        assert_eq!(problem["code"], "calculations.invalid_expression");
    }

    let (_, list) = send(&app, "GET", "/calculations", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn failed_update_leaves_record_untouched() {
    let (app, _module) = test_app().await;
    let (_, created) =
        send(&app, "POST", "/calculations", Some(json!({"expression": "6/3"}))).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/calculations/{id}"),
        Some(json!({"expression": "6/0"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/calculations", None).await;
    assert_eq!(list, json!([{"id": id, "expression": "6/3", "result": "2"}]));
}

#[tokio::test]
async fn patch_of_unknown_id_creates_nothing() {
    let (app, _module) = test_app().await;

    let (status, problem) = send(
        &app,
        "PATCH",
        "/calculations/00000000-0000-4000-8000-000000000000",
        Some(json!({"expression": "1+1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["error"], "Calculation not found");
    assert_eq!(
        problem["instance"],
        "/calculations/00000000-0000-4000-8000-000000000000"
    );

    let (_, list) = send(&app, "GET", "/calculations", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn list_is_ordered_by_creation() {
    let (app, _module) = test_app().await;

    let mut ids = Vec::new();
    for expression in ["1", "2", "3"] {
        let (_, created) = send(
            &app,
            "POST",
            "/calculations",
            Some(json!({"expression": expression})),
        )
        .await;
        ids.push(created["id"].clone());
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (_, list) = send(&app, "GET", "/calculations", None).await;
    let listed: Vec<Value> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].clone())
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn sdk_client_shares_storage_with_rest() {
    let (app, module) = test_app().await;
    let client = module.client();

    let created = client.create("2**10".to_owned()).await.unwrap();
    assert_eq!(created.result, "1024");

    let (_, list) = send(&app, "GET", "/calculations", None).await;
    assert_eq!(list[0]["id"], created.id.as_str());
}

#[tokio::test]
async fn in_memory_storage_without_database() {
    let module = CalculationsModule::init(&CalculationsConfig::default(), None)
        .await
        .unwrap();
    let app = module.register_rest(Router::new());

    let (status, created) =
        send(&app, "POST", "/calculations", Some(json!({"expression": "'a' + 1"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["result"], "a1");
}

#[tokio::test]
async fn long_expression_chain_under_raised_limit() {
    let config = CalculationsConfig {
        max_expression_length: 8192,
        ..CalculationsConfig::default()
    };
    let module = CalculationsModule::init(&config, Some(sqlite_memory().await))
        .await
        .unwrap();
    let app = module.register_rest(Router::new());

    let expression = "1+".repeat(2000) + "1";
    let (status, created) =
        send(&app, "POST", "/calculations", Some(json!({ "expression": expression }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["result"], "2001");
}

#[tokio::test]
async fn limits_above_ceiling_are_rejected_at_init() {
    let config = CalculationsConfig {
        max_expression_length: 10_000_000,
        ..CalculationsConfig::default()
    };
    let err = CalculationsModule::init(&config, None).await.err().unwrap();
    assert!(err.to_string().contains("max_expression_length"));
}
