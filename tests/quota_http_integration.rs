//! Integration tests for the quota and entitlement HTTP endpoints.
//!
//! These tests exercise the full router over in-memory adapters: caller
//! identity extraction, the application handlers, and the response DTOs.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::util::ServiceExt;

use plan_gate::adapters::http::quota::{app_router, QuotaAppState};
use plan_gate::adapters::plan::InMemoryPlanReader;
use plan_gate::adapters::usage::InMemoryUsageStore;
use plan_gate::domain::foundation::UserId;

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn app_with_plans(plans: &[(&str, &str)]) -> Router {
    let reader = Arc::new(InMemoryPlanReader::new());
    for (user, tier) in plans {
        reader.set_plan(&UserId::new(*user).unwrap(), *tier).await;
    }

    let state = QuotaAppState {
        plan_reader: reader,
        usage_store: Arc::new(InMemoryUsageStore::new()),
    };
    app_router().with_state(state)
}

async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("X-User-Id", user);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// =============================================================================
// Quota: Check-and-Consume
// =============================================================================

#[tokio::test]
async fn free_user_counts_down_and_then_is_denied() {
    let app = app_with_plans(&[("fan-1", "free")]).await;

    for expected_remaining in [2, 1, 0] {
        let (status, body) =
            request_json(&app, "POST", "/api/quota/messages", Some("fan-1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], Value::Bool(true));
        assert_eq!(body["remaining"], Value::from(expected_remaining));
    }

    let (status, body) = request_json(&app, "POST", "/api/quota/messages", Some("fan-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], Value::Bool(false));
    assert_eq!(body["remaining"], Value::from(0));
}

#[tokio::test]
async fn pro_user_is_unlimited() {
    let app = app_with_plans(&[("creator-1", "pro")]).await;

    for _ in 0..5 {
        let (status, body) =
            request_json(&app, "POST", "/api/quota/messages", Some("creator-1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], Value::Bool(true));
        assert_eq!(body["remaining"], Value::Null);
    }
}

#[tokio::test]
async fn anonymous_consume_is_denied_not_rejected() {
    let app = app_with_plans(&[]).await;

    let (status, body) = request_json(&app, "POST", "/api/quota/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], Value::Bool(false));
    assert_eq!(body["remaining"], Value::from(0));
}

#[tokio::test]
async fn unknown_plan_string_is_denied() {
    let app = app_with_plans(&[("fan-2", "platinum")]).await;

    let (status, body) = request_json(&app, "POST", "/api/quota/messages", Some("fan-2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], Value::Bool(false));
}

#[tokio::test]
async fn users_consume_from_independent_budgets() {
    let app = app_with_plans(&[("fan-a", "free"), ("fan-b", "free")]).await;

    for _ in 0..3 {
        request_json(&app, "POST", "/api/quota/messages", Some("fan-a")).await;
    }

    let (_, body) = request_json(&app, "POST", "/api/quota/messages", Some("fan-a")).await;
    assert_eq!(body["allowed"], Value::Bool(false));

    let (_, body) = request_json(&app, "POST", "/api/quota/messages", Some("fan-b")).await;
    assert_eq!(body["allowed"], Value::Bool(true));
    assert_eq!(body["remaining"], Value::from(2));
}

// =============================================================================
// Quota: Status
// =============================================================================

#[tokio::test]
async fn status_reports_without_consuming() {
    let app = app_with_plans(&[("fan-1", "free")]).await;

    request_json(&app, "POST", "/api/quota/messages", Some("fan-1")).await;

    for _ in 0..3 {
        let (status, body) =
            request_json(&app, "GET", "/api/quota/messages", Some("fan-1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ceiling"], Value::from(3));
        assert_eq!(body["used"], Value::from(1));
        assert_eq!(body["remaining"], Value::from(2));
    }
}

#[tokio::test]
async fn status_for_unlimited_plan_is_null_ceiling() {
    let app = app_with_plans(&[("creator-1", "elite")]).await;

    let (status, body) = request_json(&app, "GET", "/api/quota/messages", Some("creator-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ceiling"], Value::Null);
    assert_eq!(body["remaining"], Value::Null);
}

#[tokio::test]
async fn status_for_anonymous_is_exhausted() {
    let app = app_with_plans(&[]).await;

    let (status, body) = request_json(&app, "GET", "/api/quota/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remaining"], Value::from(0));
}

// =============================================================================
// Entitlements
// =============================================================================

#[tokio::test]
async fn entitlements_return_table_values() {
    let app = app_with_plans(&[("fan-1", "basic")]).await;

    let (status, body) = request_json(&app, "GET", "/api/entitlements", Some("fan-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], Value::from("basic"));
    assert_eq!(body["entitlements"]["send_images"], Value::Bool(true));
    assert_eq!(body["entitlements"]["send_files"], Value::Bool(false));
    assert_eq!(body["entitlements"]["max_messages_per_day"], Value::from(50));
    assert_eq!(body["entitlements"]["discovery_boost"], Value::from("small"));
}

#[tokio::test]
async fn entitlements_for_anonymous_are_null() {
    let app = app_with_plans(&[]).await;

    let (status, body) = request_json(&app, "GET", "/api/entitlements", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], Value::Null);
    assert_eq!(body["entitlements"], Value::Null);
}

#[tokio::test]
async fn feature_check_reflects_plan() {
    let app = app_with_plans(&[("creator-1", "pro"), ("fan-1", "free")]).await;

    let (_, body) = request_json(
        &app,
        "GET",
        "/api/entitlements/features/monetize",
        Some("creator-1"),
    )
    .await;
    assert_eq!(body["enabled"], Value::Bool(true));

    let (_, body) = request_json(
        &app,
        "GET",
        "/api/entitlements/features/monetize",
        Some("fan-1"),
    )
    .await;
    assert_eq!(body["enabled"], Value::Bool(false));
}

#[tokio::test]
async fn unknown_feature_name_is_disabled() {
    let app = app_with_plans(&[("creator-1", "elite")]).await;

    let (status, body) = request_json(
        &app,
        "GET",
        "/api/entitlements/features/time_travel",
        Some("creator-1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feature"], Value::from("time_travel"));
    assert_eq!(body["enabled"], Value::Bool(false));
}

#[tokio::test]
async fn feature_check_for_anonymous_is_disabled() {
    let app = app_with_plans(&[]).await;

    let (_, body) =
        request_json(&app, "GET", "/api/entitlements/features/tip_creators", None).await;
    assert_eq!(body["enabled"], Value::Bool(false));
}
