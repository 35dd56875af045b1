use chrono::{DateTime, Utc};

/// A row in the `qr_codes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeRecord {
    pub id: i64,
    /// Unique business key, e.g. an asset tag or ticket number.
    pub identifier: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    /// Exact text obtained by scanning the code.
    pub raw_content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable columns of a record, as written by insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeFields {
    pub identifier: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub raw_content: String,
}

impl QrCodeRecord {
    pub fn fields(&self) -> QrCodeFields {
        QrCodeFields {
            identifier: self.identifier.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            raw_content: self.raw_content.clone(),
        }
    }
}
