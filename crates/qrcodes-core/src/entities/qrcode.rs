use std::future::Future;

use chrono::{DateTime, Utc};

use crate::entities::dao::{QrCodeFields, QrCodeRecord};
use crate::entities::{SqlStore, format_timestamp, parse_timestamp};

pub trait QrCodeStore: Send + Sync + 'static {
    /// Insert a new row; `created_at` doubles as the initial `updated_at`.
    ///
    /// A duplicate `identifier` fails with the database's unique-violation
    /// error, there is no separate existence check.
    fn insert_qr_code(
        &self,
        fields: QrCodeFields,
        created_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<QrCodeRecord, sqlx::Error>> + Send;
    fn get_qr_code(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<QrCodeRecord>, sqlx::Error>> + Send;
    /// All rows, newest first.
    fn list_qr_codes(&self) -> impl Future<Output = Result<Vec<QrCodeRecord>, sqlx::Error>> + Send;
    fn find_by_raw_content(
        &self,
        raw_content: &str,
    ) -> impl Future<Output = Result<Option<QrCodeRecord>, sqlx::Error>> + Send;
    fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<QrCodeRecord>, sqlx::Error>> + Send;
    /// Overwrite the editable columns; `None` when no row has this id.
    fn update_qr_code(
        &self,
        id: i64,
        fields: QrCodeFields,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<QrCodeRecord>, sqlx::Error>> + Send;
    /// Returns `true` if a row was removed.
    fn delete_qr_code(&self, id: i64) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
    /// Count rows created at or after `since`, or all rows when `None`.
    fn count_qr_codes(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
}

type QrCodeRow = (
    i64,
    String,
    Option<String>,
    Option<String>,
    String,
    String,
    String,
);

const SELECT_COLUMNS: &str =
    "SELECT id, identifier, display_name, description, raw_content, created_at, updated_at \
     FROM qr_codes";

fn from_row(
    (id, identifier, display_name, description, raw_content, created_at, updated_at): QrCodeRow,
) -> QrCodeRecord {
    QrCodeRecord {
        id,
        identifier,
        display_name,
        description,
        raw_content,
        created_at: parse_timestamp(&created_at, "created_at"),
        updated_at: parse_timestamp(&updated_at, "updated_at"),
    }
}

impl QrCodeStore for SqlStore {
    async fn insert_qr_code(
        &self,
        fields: QrCodeFields,
        created_at: DateTime<Utc>,
    ) -> Result<QrCodeRecord, sqlx::Error> {
        let ts = format_timestamp(created_at);
        let result = sqlx::query(
            "INSERT INTO qr_codes (identifier, display_name, description, raw_content, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        )
        .bind(&fields.identifier)
        .bind(&fields.display_name)
        .bind(&fields.description)
        .bind(&fields.raw_content)
        .bind(&ts)
        .execute(&self.pool)
        .await?;

        Ok(QrCodeRecord {
            id: result.last_insert_rowid(),
            identifier: fields.identifier,
            display_name: fields.display_name,
            description: fields.description,
            raw_content: fields.raw_content,
            created_at: parse_timestamp(&ts, "created_at"),
            updated_at: parse_timestamp(&ts, "updated_at"),
        })
    }

    async fn get_qr_code(&self, id: i64) -> Result<Option<QrCodeRecord>, sqlx::Error> {
        let row: Option<QrCodeRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(from_row))
    }

    async fn list_qr_codes(&self) -> Result<Vec<QrCodeRecord>, sqlx::Error> {
        let rows: Vec<QrCodeRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn find_by_raw_content(
        &self,
        raw_content: &str,
    ) -> Result<Option<QrCodeRecord>, sqlx::Error> {
        let row: Option<QrCodeRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE raw_content = ?1 ORDER BY created_at DESC, id DESC LIMIT 1"
        ))
        .bind(raw_content)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(from_row))
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<QrCodeRecord>, sqlx::Error> {
        let row: Option<QrCodeRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE identifier = ?1"))
                .bind(identifier)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(from_row))
    }

    async fn update_qr_code(
        &self,
        id: i64,
        fields: QrCodeFields,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<QrCodeRecord>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE qr_codes \
             SET identifier = ?1, display_name = ?2, description = ?3, raw_content = ?4, updated_at = ?5 \
             WHERE id = ?6",
        )
        .bind(&fields.identifier)
        .bind(&fields.display_name)
        .bind(&fields.description)
        .bind(&fields.raw_content)
        .bind(format_timestamp(updated_at))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_qr_code(id).await
    }

    async fn delete_qr_code(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM qr_codes WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_qr_codes(&self, since: Option<DateTime<Utc>>) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = if let Some(since) = since {
            sqlx::query_as("SELECT COUNT(*) FROM qr_codes WHERE created_at >= ?1")
                .bind(format_timestamp(since))
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_as("SELECT COUNT(*) FROM qr_codes")
                .fetch_one(&self.pool)
                .await?
        };
        Ok(count)
    }
}
