//! Persistence layer.
//!
//! [`QrCodeStore`] defines the interface the service talks to. The default
//! implementation is [`SqlStore`], backed by a SQLite pool. To swap to
//! another database, implement [`QrCodeStore`] for a new type and hand it to
//! [`crate::QrCodeService::new`].
//!
//! Trait methods use `impl Future` in their signatures so no extra
//! `async-trait` crate is required.

pub mod dao;
pub mod qrcode;

pub use dao::{QrCodeFields, QrCodeRecord};
pub use qrcode::QrCodeStore;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::CoreError;

/// SQLite-backed record store.
#[derive(Clone, Debug)]
pub struct SqlStore {
    pool: SqlitePool,
}

impl SqlStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g.
    /// `"sqlite://qrcodes.db?mode=rwc"` or `"sqlite::memory:"` for tests.
    /// An in-memory database lives inside a single connection, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, CoreError> {
        let options = SqliteConnectOptions::from_str(url)?;
        let pool = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .acquire_timeout(Duration::from_secs(10))
                .connect_with(options)
                .await?
        };
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Fresh, migrated in-memory database.
    pub async fn in_memory() -> Result<Self, CoreError> {
        Self::connect("sqlite::memory:", 1).await
    }

    /// Round-trip a trivial query; used by the health endpoint.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection; used on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// `sqlite::memory:` and `mode=memory` URLs both open a private in-memory database.
fn is_in_memory(url: &str) -> bool {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    let (database, params) = rest.split_once('?').unwrap_or((rest, ""));
    database == ":memory:" || params.split('&').any(|pair| pair == "mode=memory")
}

/// Fixed-width UTC form (`2026-10-14T08:30:00.000000Z`), so stored strings
/// sort chronologically.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str, column: &'static str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        tracing::warn!(raw = %raw, column, error = %e, "failed to parse stored timestamp; using now");
        Utc::now()
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_are_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2026, 10, 14, 8, 30, 0).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(5);
        assert_eq!(format_timestamp(whole), "2026-10-14T08:30:00.000000Z");
        assert_eq!(format_timestamp(fractional), "2026-10-14T08:30:00.005000Z");
        assert!(format_timestamp(whole) < format_timestamp(fractional));
    }

    #[test]
    fn timestamp_round_trips() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(parse_timestamp(&format_timestamp(ts), "created_at"), ts);
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://:memory:"));
        assert!(is_in_memory("sqlite://scratch.db?mode=memory"));
        assert!(is_in_memory("sqlite://scratch?cache=shared&mode=memory"));
        assert!(!is_in_memory("sqlite://qrcodes.db?mode=rwc"));
        assert!(!is_in_memory("sqlite://memory.db"));
    }

    #[tokio::test]
    async fn mode_memory_url_keeps_data_across_queries() {
        let store = SqlStore::connect("sqlite://scratch?mode=memory", 5).await.unwrap();
        let fields = QrCodeFields {
            identifier: "1".into(),
            display_name: None,
            description: None,
            raw_content: "1".into(),
        };
        store.insert_qr_code(fields, Utc::now()).await.unwrap();
        assert_eq!(store.count_qr_codes(None).await.unwrap(), 1);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn in_memory_store_is_migrated() {
        let store = SqlStore::in_memory().await.unwrap();
        assert_eq!(store.count_qr_codes(None).await.unwrap(), 0);
    }
}
