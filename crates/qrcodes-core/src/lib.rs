//! qrcodes-core – QR-code registry domain logic.
//!
//! Holds everything below the HTTP layer:
//! - [`entities`]: the persisted record shape, the [`QrCodeStore`] trait and
//!   its SQLite implementation [`SqlStore`].
//! - [`extract`]: numeric-token extraction from scanned text.
//! - [`service`]: record management, content resolution and statistics.
//! - [`schemas`]: request/response shapes with their validation rules.

pub mod entities;
pub mod error;
pub mod extract;
pub mod schemas;
pub mod service;

pub use entities::{QrCodeFields, QrCodeRecord, QrCodeStore, SqlStore};
pub use error::CoreError;
pub use extract::extract_number;
pub use service::{MatchKind, QrCodeService, QrCodeStats, Resolved};
