//! Shared response envelope types for API handlers.
//!
//! Every response is `{ "data": ..., "error": ... }` with exactly one side
//! non-null. Errors are rendered by [`AppError`](crate::error::AppError);
//! successful payloads go through [`DataResponse`].

use serde::Serialize;

/// Standard `{ "data": T, "error": null }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    pub error: Option<()>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, error: None }
    }
}

/// Acknowledgement payload for operations with nothing else to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
