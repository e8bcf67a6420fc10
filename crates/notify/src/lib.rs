//! Outbound email notifications.
//!
//! Delivery is strictly best-effort: callers log and swallow every failure
//! so a notification outage can never fail a mutation that already
//! committed.

pub mod email;
pub mod messages;

pub use email::{EmailConfig, EmailDelivery, EmailError};
