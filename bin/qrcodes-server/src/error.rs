//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! **Security note:** Database and internal errors are logged with full
//! detail but only a generic message is returned to the caller so that
//! file paths, SQL, or other implementation details never leak to clients.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use qrcodes_core::CoreError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

/// All errors that can occur in the qrcodes-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the SQLite store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body exceeds the configured size limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// One or more request fields failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The write collides with an existing record (duplicate identifier).
    #[error("conflict: {0}")]
    Conflict(String),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
            ServerError::PayloadTooLarge(m) => {
                (StatusCode::PAYLOAD_TOO_LARGE, json!({ "error": m }))
            }
            // Duplicate identifiers are reported as 400, like field errors.
            ServerError::Conflict(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
            ServerError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "validation failed", "fields": field_messages(errors) }),
            ),

            // Internal errors: log the full detail, return a generic message.
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
            ServerError::Internal(m) => {
                error!(message = %m, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ServerError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Database(e) => ServerError::Database(e),
            CoreError::Migrate(e) => ServerError::Internal(e.to_string()),
            CoreError::DuplicateIdentifier(identifier) => {
                ServerError::Conflict(format!("identifier {identifier} already exists"))
            }
            CoreError::NotFound(id) => ServerError::NotFound(format!("QR code {id} not found")),
            CoreError::Validation(errors) => ServerError::Validation(errors),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        ServerError::BadRequest(rejection.body_text())
    }
}

/// `{field: [message, ...]}` with camelCase field names, matching the JSON
/// bodies clients send.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(m) => m.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (camel_case(&field), messages)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use http_body_util::BodyExt;
    use qrcodes_core::schemas::ReplaceRecord;
    use validator::Validate;

    async fn body_json(err: ServerError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn camel_cases_field_names() {
        assert_eq!(camel_case("raw_content"), "rawContent");
        assert_eq!(camel_case("display_name"), "displayName");
        assert_eq!(camel_case("identifier"), "identifier");
    }

    #[tokio::test]
    async fn duplicate_maps_to_400_naming_value() {
        let err = ServerError::from(CoreError::DuplicateIdentifier("42".into()));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("42"));
    }

    #[tokio::test]
    async fn validation_lists_fields() {
        let errors = ReplaceRecord::default().validate().unwrap_err();
        let (status, body) = body_json(ServerError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["fields"]["identifier"].is_array());
        assert!(body["fields"]["rawContent"].is_array());
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let (status, body) = body_json(ServerError::from(CoreError::NotFound(5))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "QR code 5 not found");
    }

    #[tokio::test]
    async fn oversized_body_maps_to_413() {
        let err = ServerError::PayloadTooLarge("request body exceeds 16 bytes".into());
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "request body exceeds 16 bytes");
    }

    #[tokio::test]
    async fn internal_errors_hide_detail() {
        let (status, body) = body_json(ServerError::Internal("disk path /var/x".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }
}
