//! Marvedge domain primitives.
//!
//! Transport- and storage-agnostic pieces shared by every other crate:
//! id/timestamp aliases, the domain error type, tour input rules, and the
//! page route-gate policy.

pub mod error;
pub mod gate;
pub mod tour;
pub mod types;
