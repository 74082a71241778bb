//! Request extractors whose rejections render as `ApiError` JSON bodies
//!
//! Axum's stock `Json` and `Path` extractors reject with plain-text bodies.
//! These wrappers route the rejection through `ApiError` so that every error
//! path answers with `{"error": ...}`.
//!
//! The blog answers malformed bodies with its own shorter message, so its
//! handlers take `BlogJson` instead of `AppJson`.
//!
//! Handlers that must check authentication or resource existence before
//! looking at the body take the extractor wrapped in a `Result` and apply
//! `?` at the point where the body is actually needed.
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::errors::ApiError;

/// JSON request body, rejected as `ApiError::InvalidJson`
#[derive(FromRequest, Debug)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Blog JSON request body, rejected as `ApiError::InvalidBlogJson`
#[derive(FromRequest, Debug)]
#[from_request(via(axum::Json), rejection(BlogJsonRejection))]
pub struct BlogJson<T>(pub T);

/// A blog request body that could not be read as JSON
#[derive(Debug)]
pub struct BlogJsonRejection(JsonRejection);

impl From<JsonRejection> for BlogJsonRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection)
    }
}

impl From<BlogJsonRejection> for ApiError {
    fn from(BlogJsonRejection(rejection): BlogJsonRejection) -> Self {
        debug!("Rejected blog request body: {}", rejection.body_text());
        ApiError::InvalidBlogJson
    }
}

impl IntoResponse for BlogJsonRejection {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Path parameters, rejected as a 404 when they don't parse
#[derive(FromRequestParts, Debug)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);
