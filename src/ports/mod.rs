//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PlanReader` - reads the plan tier the payment collaborator wrote
//! - `UsageStore` - the remote document store holding daily counters

mod plan_reader;
mod usage_store;

pub use plan_reader::PlanReader;
pub use usage_store::{ConsumeOutcome, UsageStore, UsageStoreError};
