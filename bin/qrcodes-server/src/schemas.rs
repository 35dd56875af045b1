//! Response envelopes specific to the HTTP surface.

use qrcodes_core::schemas::RecordResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 201 body of `POST /api/qrcodes/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub message: String,
    pub record: RecordResponse,
}

/// 200 body of `POST /api/qrcodes/verify/`.
///
/// `record` is present when `found` is true, `content` (the trimmed input)
/// when it is false.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub found: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database cannot be reached.
    pub status: String,
    pub version: String,
    /// `"ok"` or `"unreachable"`.
    pub database: String,
}
