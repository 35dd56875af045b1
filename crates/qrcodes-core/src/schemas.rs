//! Request and response shapes for the record API.
//!
//! Request bodies are camelCase and also accept the field names used by the
//! legacy scanner client (`number`, `name`, `raw_content`). Every request is
//! passed through `normalized()` before `validate()`: strings are trimmed and
//! blank optional strings become `None`.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::QrCodeRecord;

/// Body of `POST /api/qrcodes/`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecord {
    #[serde(default, alias = "number")]
    #[validate(length(min = 1, max = 100, message = "identifier is required (at most 100 characters)"))]
    pub identifier: String,
    #[serde(default, alias = "name")]
    #[validate(length(max = 200, message = "display name must be at most 200 characters"))]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `identifier` when omitted or blank.
    #[serde(default, alias = "raw_content")]
    pub raw_content: Option<String>,
}

/// Body of `PUT /api/qrcodes/{id}/`. Optional fields left out are cleared.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceRecord {
    #[serde(default, alias = "number")]
    #[validate(length(min = 1, max = 100, message = "identifier is required (at most 100 characters)"))]
    pub identifier: String,
    #[serde(default, alias = "name")]
    #[validate(length(max = 200, message = "display name must be at most 200 characters"))]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "raw_content")]
    #[validate(length(min = 1, message = "raw content is required"))]
    pub raw_content: String,
}

/// Body of `PATCH /api/qrcodes/{id}/`. Fields left out keep their value.
///
/// `displayName` and `description` distinguish "absent" (`None`) from
/// "cleared" (`Some(None)`): an explicit `null` or blank string clears them.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchRecord {
    #[serde(default, alias = "number")]
    #[validate(length(min = 1, max = 100, message = "identifier must be 1 to 100 characters"))]
    pub identifier: Option<String>,
    #[serde(default, alias = "name", deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 200, message = "display name must be at most 200 characters"))]
    pub display_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, alias = "raw_content")]
    #[validate(length(min = 1, message = "raw content may not be blank"))]
    pub raw_content: Option<String>,
}

/// Body of `POST /api/qrcodes/verify/`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct VerifyRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "QR code content is required"))]
    pub content: String,
}

/// Full representation of a stored record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub id: i64,
    pub identifier: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub raw_content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl QrCodeRecord {
    pub fn to_response(&self) -> RecordResponse {
        RecordResponse {
            id: self.id,
            identifier: self.identifier.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            raw_content: self.raw_content.clone(),
            created_at: self.created_at.to_rfc3339(),
            updated_at: self.updated_at.to_rfc3339(),
        }
    }
}

/// Called only when the key is present, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ── normalisation ────────────────────────────────────────────────────────────

fn trim(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() { value } else { trimmed.to_owned() }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(trim).filter(|v| !v.is_empty())
}

impl CreateRecord {
    pub fn normalized(self) -> Self {
        Self {
            identifier: trim(self.identifier),
            display_name: trim_optional(self.display_name),
            description: trim_optional(self.description),
            raw_content: trim_optional(self.raw_content),
        }
    }
}

impl ReplaceRecord {
    pub fn normalized(self) -> Self {
        Self {
            identifier: trim(self.identifier),
            display_name: trim_optional(self.display_name),
            description: trim_optional(self.description),
            raw_content: trim(self.raw_content),
        }
    }
}

impl PatchRecord {
    /// Blank `identifier`/`rawContent` stay `Some("")` so validation rejects
    /// them instead of silently ignoring the field. Blank `displayName` or
    /// `description` becomes `Some(None)`, a clear.
    pub fn normalized(self) -> Self {
        Self {
            identifier: self.identifier.map(trim),
            display_name: self.display_name.map(trim_optional),
            description: self.description.map(trim_optional),
            raw_content: self.raw_content.map(trim),
        }
    }
}

impl VerifyRequest {
    pub fn normalized(self) -> Self {
        Self { content: trim(self.content) }
    }
}
