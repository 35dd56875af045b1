//! Scanned-content resolution behind `verify`.

use tracing::debug;
use validator::Validate;

use crate::entities::{QrCodeRecord, QrCodeStore};
use crate::error::CoreError;
use crate::extract::extract_number;
use crate::schemas::VerifyRequest;
use crate::service::QrCodeService;

/// Which lookup step produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// `raw_content` equals the scanned text.
    RawContent,
    /// `identifier` equals the number extracted from the scanned text.
    Identifier,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::RawContent => "raw_content",
            MatchKind::Identifier => "identifier",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub record: QrCodeRecord,
    pub matched_by: MatchKind,
}

/// Map scanned text to a stored record.
///
/// An exact `raw_content` match always wins; only on a miss is the extracted
/// number compared against identifiers. `content` must already be trimmed and
/// non-blank. A miss is `Ok(None)`.
pub async fn resolve<S: QrCodeStore>(
    store: &S,
    content: &str,
) -> Result<Option<Resolved>, sqlx::Error> {
    if let Some(record) = store.find_by_raw_content(content).await? {
        return Ok(Some(Resolved { record, matched_by: MatchKind::RawContent }));
    }

    let Some(number) = extract_number(content) else {
        debug!(content, "no number in scanned content");
        return Ok(None);
    };

    Ok(store
        .find_by_identifier(number)
        .await?
        .map(|record| Resolved { record, matched_by: MatchKind::Identifier }))
}

impl<S: QrCodeStore> QrCodeService<S> {
    /// Validate a verify request and resolve its content.
    ///
    /// Returns the trimmed content alongside the outcome so callers can echo
    /// it back on a miss.
    pub async fn verify(
        &self,
        req: VerifyRequest,
    ) -> Result<(String, Option<Resolved>), CoreError> {
        let req = req.normalized();
        req.validate()?;
        let resolved = resolve(&self.store, &req.content).await?;
        Ok((req.content, resolved))
    }
}
