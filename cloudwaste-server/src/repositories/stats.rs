use std::sync::Arc;

use sqlx::Error;
use time::OffsetDateTime;

use crate::configs::Storage;

/// Dashboard counters read in a single statement.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StatsSnapshot {
    pub total_bins: i64,
    pub critical_bins: i64,
    pub active_trucks: i64,
    pub pending_reports: i64,
    pub collections_today: i64,
}

pub struct StatsRepository {
    storage: Arc<Storage>,
}

impl StatsRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub async fn snapshot(&self, today_start: OffsetDateTime) -> Result<StatsSnapshot, Error> {
        let snapshot: StatsSnapshot = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM bins) AS total_bins,
                (SELECT COUNT(*) FROM bins WHERE status = 'critical') AS critical_bins,
                (SELECT COUNT(*) FROM trucks WHERE status = 'active') AS active_trucks,
                (SELECT COUNT(*) FROM reports WHERE status = 'pending') AS pending_reports,
                (SELECT COUNT(*) FROM collections WHERE julianday(collected_at) >= julianday($1)) AS collections_today
            "#,
        )
        .bind(today_start)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(snapshot)
    }
}
