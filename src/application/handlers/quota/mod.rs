//! Quota handlers - check-and-consume and read-only status.

mod consume_message;
mod get_quota_status;

pub use consume_message::{ConsumeMessageCommand, ConsumeMessageHandler};
pub use get_quota_status::{GetQuotaStatusHandler, GetQuotaStatusQuery};
