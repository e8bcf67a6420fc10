//! Session tokens, cookies, and password handling.
//!
//! - [`jwt`] -- HS256 session-token generation and validation.
//! - [`password`] -- Argon2id hashing plus the two password policies.
//! - [`cookie`] -- the `auth-token` session cookie.

pub mod cookie;
pub mod jwt;
pub mod password;
