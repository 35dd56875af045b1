use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::entities::{QrCodeFields, QrCodeRecord, QrCodeStore};
use crate::error::CoreError;
use crate::schemas::{CreateRecord, PatchRecord, ReplaceRecord};
use crate::service::QrCodeService;

impl<S: QrCodeStore> QrCodeService<S> {
    pub async fn list(&self) -> Result<Vec<QrCodeRecord>, CoreError> {
        Ok(self.store.list_qr_codes().await?)
    }

    pub async fn get(&self, id: i64) -> Result<QrCodeRecord, CoreError> {
        self.store
            .get_qr_code(id)
            .await?
            .ok_or(CoreError::NotFound(id))
    }

    /// Persist a new record.
    ///
    /// Uniqueness is decided by the single INSERT hitting the identifier
    /// index, so two concurrent submissions of one identifier cannot both
    /// succeed.
    pub async fn create(&self, req: CreateRecord) -> Result<QrCodeRecord, CoreError> {
        let req = req.normalized();
        req.validate()?;

        let raw_content = req.raw_content.unwrap_or_else(|| req.identifier.clone());
        let fields = QrCodeFields {
            identifier: req.identifier,
            display_name: req.display_name,
            description: req.description,
            raw_content,
        };
        let identifier = fields.identifier.clone();
        let record = self
            .store
            .insert_qr_code(fields, Utc::now())
            .await
            .map_err(|e| CoreError::from_write(e, &identifier))?;

        info!(id = record.id, identifier = %record.identifier, "QR code created");
        Ok(record)
    }

    /// Full update; optional fields missing from `req` are cleared.
    pub async fn replace(&self, id: i64, req: ReplaceRecord) -> Result<QrCodeRecord, CoreError> {
        let req = req.normalized();
        req.validate()?;

        let fields = QrCodeFields {
            identifier: req.identifier,
            display_name: req.display_name,
            description: req.description,
            raw_content: req.raw_content,
        };
        self.write_update(id, fields).await
    }

    /// Partial update; fields missing from `req` keep their stored value.
    pub async fn patch(&self, id: i64, req: PatchRecord) -> Result<QrCodeRecord, CoreError> {
        let req = req.normalized();
        req.validate()?;

        let current = self.get(id).await?;
        let mut fields = current.fields();
        if let Some(identifier) = req.identifier {
            fields.identifier = identifier;
        }
        if let Some(display_name) = req.display_name {
            fields.display_name = display_name;
        }
        if let Some(description) = req.description {
            fields.description = description;
        }
        if let Some(raw_content) = req.raw_content {
            fields.raw_content = raw_content;
        }
        self.write_update(id, fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        if !self.store.delete_qr_code(id).await? {
            return Err(CoreError::NotFound(id));
        }
        info!(id, "QR code deleted");
        Ok(())
    }

    async fn write_update(&self, id: i64, fields: QrCodeFields) -> Result<QrCodeRecord, CoreError> {
        let identifier = fields.identifier.clone();
        let record = self
            .store
            .update_qr_code(id, fields, Utc::now())
            .await
            .map_err(|e| CoreError::from_write(e, &identifier))?
            .ok_or(CoreError::NotFound(id))?;
        info!(id, identifier = %record.identifier, "QR code updated");
        Ok(record)
    }
}
