//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` input DTOs as they arrive over the wire
//! - Normalized insert structs the repositories consume

pub mod tour;
pub mod user;
