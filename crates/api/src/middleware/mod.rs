//! Request-time session handling.
//!
//! - [`session::SessionUser`] -- identity extracted from the `token` cookie.
//! - [`session::resolve_current_user`] -- identity plus profile and tours.
//! - [`gate::route_gate`] -- redirects page requests by session state.

pub mod gate;
pub mod session;
