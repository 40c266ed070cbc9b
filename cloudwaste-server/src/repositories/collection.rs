use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::{Collection, DailyCount};

pub struct CollectionRepository {
    storage: Arc<Storage>,
}

impl CollectionRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl CollectionRepository {
    pub async fn create(
        &self,
        item: &Collection,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO collections (bin_id, truck_id, driver_id, collected_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&item.bin_id)
        .bind(&item.truck_id)
        .bind(item.driver_id)
        .bind(item.collected_at)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    #[cfg(test)]
    pub async fn find_by_bin_id(&self, bin_id: &str) -> Result<Vec<Collection>, Error> {
        let collections: Vec<Collection> = sqlx::query_as(
            "SELECT * FROM collections WHERE bin_id = $1 ORDER BY julianday(collected_at) DESC",
        )
        .bind(bin_id)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(collections)
    }

    /// Collections since `since`, one row per UTC day, newest day first.
    pub async fn find_daily_counts(&self, since: OffsetDateTime) -> Result<Vec<DailyCount>, Error> {
        let rows: Vec<DailyCount> = sqlx::query_as(
            r#"
            SELECT DATE(collected_at) AS date, COUNT(*) AS count
            FROM collections
            WHERE julianday(collected_at) >= julianday($1)
            GROUP BY DATE(collected_at)
            ORDER BY date DESC
            "#,
        )
        .bind(since)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(rows)
    }
}
