//! Creation-count statistics.
//!
//! Windows are UTC calendar days counted back from `now`, today included:
//! the week is the last 7 days, the month the last 30.

use chrono::{DateTime, Days, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::QrCodeStore;
use crate::error::CoreError;
use crate::service::QrCodeService;

const WEEK_DAYS: u64 = 7;
const MONTH_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeStats {
    pub total_records: i64,
    pub created_today: i64,
    pub created_this_week: i64,
    pub created_this_month: i64,
}

/// Start instants of the counting windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindows {
    pub today: DateTime<Utc>,
    pub week: DateTime<Utc>,
    pub month: DateTime<Utc>,
}

impl StatsWindows {
    pub fn at(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let start_of = |days_back: u64| {
            today
                .checked_sub_days(Days::new(days_back))
                .unwrap_or(today)
                .and_time(NaiveTime::MIN)
                .and_utc()
        };
        Self {
            today: start_of(0),
            week: start_of(WEEK_DAYS - 1),
            month: start_of(MONTH_DAYS - 1),
        }
    }
}

impl<S: QrCodeStore> QrCodeService<S> {
    /// Recompute all counts from the record set as of `now`.
    pub async fn stats(&self, now: DateTime<Utc>) -> Result<QrCodeStats, CoreError> {
        let windows = StatsWindows::at(now);
        Ok(QrCodeStats {
            total_records: self.store.count_qr_codes(None).await?,
            created_today: self.store.count_qr_codes(Some(windows.today)).await?,
            created_this_week: self.store.count_qr_codes(Some(windows.week)).await?,
            created_this_month: self.store.count_qr_codes(Some(windows.month)).await?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::{QrCodeFields, SqlStore};
    use crate::schemas::CreateRecord;
    use chrono::{Duration, TimeZone};

    fn fields(identifier: &str) -> QrCodeFields {
        QrCodeFields {
            identifier: identifier.into(),
            display_name: None,
            description: None,
            raw_content: identifier.into(),
        }
    }

    #[test]
    fn windows_start_at_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 15, 45, 0).unwrap();
        let w = StatsWindows::at(now);
        assert_eq!(w.today, Utc.with_ymd_and_hms(2026, 10, 14, 0, 0, 0).unwrap());
        assert_eq!(w.week, Utc.with_ymd_and_hms(2026, 10, 8, 0, 0, 0).unwrap());
        assert_eq!(w.month, Utc.with_ymd_and_hms(2026, 9, 15, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn counts_records_created_today() {
        let service = QrCodeService::new(SqlStore::in_memory().await.unwrap());
        for n in ["1", "2", "3"] {
            service
                .create(CreateRecord { identifier: n.into(), ..Default::default() })
                .await
                .unwrap();
        }

        let stats = service.stats(Utc::now()).await.unwrap();
        assert_eq!(
            stats,
            QrCodeStats {
                total_records: 3,
                created_today: 3,
                created_this_week: 3,
                created_this_month: 3,
            }
        );
    }

    #[tokio::test]
    async fn backdated_records_fall_out_of_windows() {
        let service = QrCodeService::new(SqlStore::in_memory().await.unwrap());
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        let store = service.store();
        store.insert_qr_code(fields("today"), now).await.unwrap();
        store.insert_qr_code(fields("ten"), now - Duration::days(10)).await.unwrap();
        store.insert_qr_code(fields("forty"), now - Duration::days(40)).await.unwrap();

        let stats = service.stats(now).await.unwrap();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.created_today, 1);
        assert_eq!(stats.created_this_week, 1);
        assert_eq!(stats.created_this_month, 2);
    }

    #[tokio::test]
    async fn window_edges_are_calendar_days() {
        let service = QrCodeService::new(SqlStore::in_memory().await.unwrap());
        let now = Utc.with_ymd_and_hms(2026, 10, 14, 0, 30, 0).unwrap();
        let store = service.store();
        // Yesterday evening: not today, but inside the week.
        store
            .insert_qr_code(fields("late"), Utc.with_ymd_and_hms(2026, 10, 13, 23, 59, 0).unwrap())
            .await
            .unwrap();
        // First instant of the 7-day window.
        store
            .insert_qr_code(fields("edge"), Utc.with_ymd_and_hms(2026, 10, 8, 0, 0, 0).unwrap())
            .await
            .unwrap();
        // One second before it.
        store
            .insert_qr_code(fields("out"), Utc.with_ymd_and_hms(2026, 10, 7, 23, 59, 59).unwrap())
            .await
            .unwrap();

        let stats = service.stats(now).await.unwrap();
        assert_eq!(stats.created_today, 0);
        assert_eq!(stats.created_this_week, 2);
        assert_eq!(stats.created_this_month, 3);
    }
}
