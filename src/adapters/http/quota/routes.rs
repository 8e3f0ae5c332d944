//! Axum router configuration for quota and entitlement endpoints.

use axum::{
    routing::get,
    Router,
};

use super::handlers::{
    check_feature, consume_message, get_entitlements, get_message_quota, health, QuotaAppState,
};

/// Create the entitlement API router.
///
/// # Routes
/// - `GET /` - Full entitlement view for the caller's plan
/// - `GET /features/{feature}` - Single capability check
pub fn entitlement_routes() -> Router<QuotaAppState> {
    Router::new()
        .route("/", get(get_entitlements))
        .route("/features/:feature", get(check_feature))
}

/// Create the quota API router.
///
/// # Routes
/// - `GET /messages` - Remaining budget without consuming
/// - `POST /messages` - Check-and-consume one message
pub fn quota_routes() -> Router<QuotaAppState> {
    Router::new().route("/messages", get(get_message_quota).post(consume_message))
}

/// Create the complete application router.
///
/// Mounts the API modules under `/api` and the liveness probe at
/// `/health`.
///
/// # Example
///
/// ```ignore
/// use plan_gate::adapters::http::quota::{app_router, QuotaAppState};
///
/// let state = QuotaAppState { /* ... */ };
/// let app = app_router().with_state(state);
/// ```
pub fn app_router() -> Router<QuotaAppState> {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .nest("/entitlements", entitlement_routes())
                .nest("/quota", quota_routes()),
        )
        .route("/health", get(health))
}
