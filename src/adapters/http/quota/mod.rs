//! Quota and entitlement HTTP endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::QuotaAppState;
pub use routes::app_router;
