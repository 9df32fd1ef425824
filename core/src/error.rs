//! Error types for the product API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! record does not exist" from "the service failed". All other non-2xx
//! responses land in `HttpError` with the raw status code and body.
//! `user_message` turns any variant into the single line shown to a user.

use serde_json::Value;

use crate::types::FieldErrors;

/// Errors returned by `ProductClient` and `ProductApi`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service returned 404.
    #[error("resource not found")]
    NotFound { body: String },

    /// The service returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// An update was attempted with a draft.
    #[error("product has no id")]
    MissingId,

    /// Client-side checks rejected the payload before any request was sent.
    #[error("invalid product: {0}")]
    Validation(FieldErrors),
}

impl ApiError {
    /// Human-readable text for this failure: the service's own message where
    /// one can be extracted, otherwise a generic description.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound { body } => service_message(body)
                .unwrap_or_else(|| "Request failed with status code 404".to_string()),
            ApiError::HttpError { status, body } => service_message(body)
                .unwrap_or_else(|| format!("Request failed with status code {status}")),
            ApiError::Transport(cause) => format!("Network Error: {cause}"),
            other => other.to_string(),
        }
    }
}

/// Pull an error message out of a response body.
///
/// JSON bodies yield their `message` field, then `error`, then a bare JSON
/// string. Any other non-empty body is returned as-is.
fn service_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string),
        Ok(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}
