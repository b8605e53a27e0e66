//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and verification.
//! - [`cookie`] -- reading and writing the `token` session cookie.

pub mod cookie;
pub mod jwt;
pub mod password;
