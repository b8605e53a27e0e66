//! Request extractors that reject with the API's JSON error envelope.
//!
//! `axum::Json` and `axum::extract::Path` answer parse failures in plain
//! text; these wrappers route them through [`AppError`] instead.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body. Malformed input is a 400 `INVALID_BODY`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters. Unparseable segments are a 400 `INVALID_PATH`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
