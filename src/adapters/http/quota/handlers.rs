//! HTTP handlers for quota and entitlement endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::entitlements::{
    CheckFeatureHandler, CheckFeatureQuery, GetEntitlementsHandler, GetEntitlementsQuery,
};
use crate::application::handlers::quota::{
    ConsumeMessageCommand, ConsumeMessageHandler, GetQuotaStatusHandler, GetQuotaStatusQuery,
};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::plan::Feature;
use crate::ports::{PlanReader, UsageStore};

use super::dto::{
    ConsumeMessageResponse, EntitlementsResponse, ErrorResponse, FeatureCheckResponse,
    HealthResponse, QuotaStatusResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; the Arc-wrapped ports are shared across handlers.
#[derive(Clone)]
pub struct QuotaAppState {
    pub plan_reader: Arc<dyn PlanReader>,
    pub usage_store: Arc<dyn UsageStore>,
}

impl QuotaAppState {
    /// Create handlers on demand from the shared state.
    pub fn consume_message_handler(&self) -> ConsumeMessageHandler {
        ConsumeMessageHandler::new(self.plan_reader.clone(), self.usage_store.clone())
    }

    pub fn quota_status_handler(&self) -> GetQuotaStatusHandler {
        GetQuotaStatusHandler::new(self.plan_reader.clone(), self.usage_store.clone())
    }

    pub fn entitlements_handler(&self) -> GetEntitlementsHandler {
        GetEntitlementsHandler::new(self.plan_reader.clone())
    }

    pub fn check_feature_handler(&self) -> CheckFeatureHandler {
        CheckFeatureHandler::new(self.plan_reader.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Caller Identity
// ════════════════════════════════════════════════════════════════════════════════

/// Caller identity extracted from the request, if any.
///
/// In production this would come from validated session state; for
/// development and testing an `X-User-Id` header is accepted. Extraction
/// never rejects: an absent or empty header yields an anonymous caller,
/// and the application layer answers anonymous callers with its
/// fail-closed denial rather than a transport-level 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<UserId>);

impl<S> axum::extract::FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s).ok());

            Ok(MaybeAuthenticated(user_id))
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// HTTP projection of a domain error.
#[derive(Debug)]
pub struct QuotaApiError(DomainError);

impl From<DomainError> for QuotaApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for QuotaApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code {
            ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::OutOfRange => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.code.to_string(), self.0.message);
        (status, Json(body)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Entitlement Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/entitlements - Full entitlement view for the caller's plan
pub async fn get_entitlements(
    State(state): State<QuotaAppState>,
    MaybeAuthenticated(user): MaybeAuthenticated,
) -> Result<impl IntoResponse, QuotaApiError> {
    let handler = state.entitlements_handler();
    let result = handler.handle(GetEntitlementsQuery { user }).await?;

    Ok(Json(EntitlementsResponse::from(result)))
}

/// GET /api/entitlements/features/{feature} - Single capability check
pub async fn check_feature(
    State(state): State<QuotaAppState>,
    Path(feature_name): Path<String>,
    MaybeAuthenticated(user): MaybeAuthenticated,
) -> Result<impl IntoResponse, QuotaApiError> {
    let handler = state.check_feature_handler();
    let result = handler
        .handle(CheckFeatureQuery {
            user,
            feature: Feature::parse(&feature_name),
        })
        .await?;

    Ok(Json(FeatureCheckResponse {
        feature: feature_name,
        enabled: result.enabled,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Quota Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/quota/messages - Remaining budget without consuming
pub async fn get_message_quota(
    State(state): State<QuotaAppState>,
    MaybeAuthenticated(user): MaybeAuthenticated,
) -> Result<impl IntoResponse, QuotaApiError> {
    let handler = state.quota_status_handler();
    let status = handler.handle(GetQuotaStatusQuery { user }).await?;

    Ok(Json(QuotaStatusResponse::from(status)))
}

/// POST /api/quota/messages - Check-and-consume one message
///
/// A denial is a 200 with `allowed: false`; only infrastructure failures
/// produce error statuses.
pub async fn consume_message(
    State(state): State<QuotaAppState>,
    MaybeAuthenticated(user): MaybeAuthenticated,
) -> Result<impl IntoResponse, QuotaApiError> {
    let handler = state.consume_message_handler();
    let decision = handler.handle(ConsumeMessageCommand { user }).await?;

    Ok(Json(ConsumeMessageResponse::from(decision)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Health
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
