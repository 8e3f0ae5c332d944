//! HTTP adapters - Axum surface for the service.

pub mod quota;
