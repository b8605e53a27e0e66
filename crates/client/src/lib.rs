//! Marvedge API client and front-end state.
//!
//! - [`api::ApiClient`] -- one async method per HTTP endpoint; the session
//!   cookie is kept in the client's cookie store.
//! - [`editor::TourEditor`] -- the step-by-step tour draft and its save flow.
//! - [`dashboard::Dashboard`] -- the signed-in user's tour list.

pub mod api;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod models;

pub use api::ApiClient;
pub use error::ClientError;
