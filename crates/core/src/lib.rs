//! Domain logic for the EduAlert teacher-absence reporting platform.
//!
//! This crate is dependency-light and free of I/O so the database and API
//! layers can both reach its constants, validation helpers, and error
//! taxonomy without pulling in sqlx or axum.

pub mod account;
pub mod email;
pub mod error;
pub mod hashing;
pub mod pagination;
pub mod reference;
pub mod report;
pub mod roles;
pub mod types;
