//! Plan Gate - Entitlement and Quota Service
//!
//! This crate implements the plan-gated feature model for the streaming
//! platform: a static tier-to-entitlements table and a per-user daily
//! message counter backed by a remote store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
