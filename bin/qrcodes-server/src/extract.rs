//! Request extractors.

use axum::extract::FromRequest;

use crate::error::ServerError;

/// `axum::Json` whose rejections (bad syntax, wrong content type) surface as
/// a 400 [`ServerError::BadRequest`] instead of axum's default 415/422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);
