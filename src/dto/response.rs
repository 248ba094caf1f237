//! Response envelopes written back to API clients.

use serde::Serialize;

use crate::pagination::Metadata;

/// Success envelope: `{message, data, meta?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Metadata>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T, meta: Option<Metadata>) -> Self {
        Self {
            message: message.into(),
            data,
            meta,
        }
    }
}

/// Failure envelope: `{error}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
