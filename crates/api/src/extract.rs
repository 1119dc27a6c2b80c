//! Request extractors whose rejections use the API error body.

use axum::extract::FromRequest;

use crate::error::AppError;

/// A JSON request body. Malformed or mistyped bodies are rejected as
/// [`AppError::InvalidBody`] rather than axum's plain-text 4xx.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
