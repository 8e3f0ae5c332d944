//! PlanReader adapter implementations.

mod in_memory;
mod postgres;

pub use in_memory::InMemoryPlanReader;
pub use postgres::PostgresPlanReader;
