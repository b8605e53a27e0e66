pub mod auth;
pub mod tour;
