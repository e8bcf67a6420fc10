//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod reference_data;
pub mod reports;
pub mod subscriptions;
