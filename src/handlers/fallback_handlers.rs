use axum::http::{Method, Uri};
use tracing::debug;

use crate::errors::ApiError;

/// Answers requests for paths no route matches
pub async fn not_found_handler(uri: Uri) -> ApiError {
    debug!("No route for {}", uri);
    ApiError::not_found("Not found")
}

/// Answers requests to a known path with the wrong method
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> ApiError {
    debug!("{} not allowed on {}", method, uri);
    ApiError::MethodNotAllowed
}
