#![allow(clippy::unwrap_used, clippy::expect_used)]
//! HTTP surface tests that need no database.
//!
//! The app here has never logged in, so these cover the banner, the health
//! report, the login gate and request validation.

use axum::http::StatusCode;
use serde_json::{Value, json};

use farm_kernel::routes::front::BANNER;
use farm_test_utils::filters;

mod common;
use common::{TestApp, response_json, response_text};

#[tokio::test]
async fn banner_is_served_with_and_without_slash() {
    let app = TestApp::offline().await;

    for uri in ["/api", "/api/"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_text(response).await, BANNER);
    }
}

#[tokio::test]
async fn health_is_unavailable_before_login() {
    let app = TestApp::offline().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = response_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["connected"], false);
    assert_eq!(body["database"], false);
}

#[tokio::test]
async fn data_routes_require_login() {
    let app = TestApp::offline().await;

    for uri in [
        "/api/livestock",
        "/api/crops",
        "/api/farmers",
        "/api/farmers/top-nurturers",
        "/api/livestock/overweight",
        "/api/livestock/4000/resources",
        "/api/tables",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {uri}");
    }

    let response = app
        .post_json("/api/livestock/filter", &filters::livestock(0, 10))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post_json("/api/crops/filter", &filters::crops(0, 100))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json!({"tableName": "farmer", "columns": ["name"]});
    let response = app.post_json("/api/select", &body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.delete("/api/livestock/4000").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_connection_returns_false() {
    let app = TestApp::offline().await;

    let response = app.get("/api/logout").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, Value::Bool(false));
}

#[tokio::test]
async fn login_against_unreachable_database_returns_false() {
    let app = TestApp::offline().await;

    let body = json!({"username": "farmhand", "password": "hunter2"});
    let response = app.post_json("/api/login", &body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, Value::Bool(false));
    assert!(!app.state.is_connected());
}

#[tokio::test]
async fn unknown_enum_value_is_rejected_before_the_login_gate() {
    let app = TestApp::offline().await;

    let body = filters::with(filters::livestock(0, 10), "animalType", json!("llama"));
    let response = app.post_json("/api/livestock/filter", &body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = filters::with(filters::crops(0, 10), "cropStatus", json!("rotten"));
    let response = app.post_json("/api/crops/filter", &body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_range_bound_is_rejected() {
    let app = TestApp::offline().await;

    let body = json!({"harvestable": "true", "minAge": 0});
    let response = app.post_json("/api/livestock/filter", &body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
