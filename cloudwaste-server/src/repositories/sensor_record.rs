use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};

use crate::configs::Storage;
use crate::models::SensorData;

pub struct SensorRecordRepository {
    storage: Arc<Storage>,
}

impl SensorRecordRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl SensorRecordRepository {
    // Append a reading; the log is never updated afterwards
    pub async fn create(
        &self,
        item: &SensorData,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO sensor_data (bin_id, fill_level, temperature, battery, lat, lng, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&item.bin_id)
        .bind(item.fill_level)
        .bind(item.temperature)
        .bind(item.battery)
        .bind(item.lat)
        .bind(item.lng)
        .bind(item.timestamp)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    // Get latest N readings for a given bin
    pub async fn find_latest_by_bin_id(
        &self,
        bin_id: &str,
        limit: i64,
    ) -> Result<Vec<SensorData>, Error> {
        let records: Vec<SensorData> = sqlx::query_as(
            r#"
            SELECT * FROM sensor_data
            WHERE bin_id = $1
            ORDER BY julianday(timestamp) DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(bin_id)
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use crate::repositories::tests::setup_test_db;

    use super::*;

    async fn create_test_bin(storage: &Storage, id: &str) {
        sqlx::query("INSERT INTO bins (id, name, neighborhood, lat, lng) VALUES ($1, 'Test Bin', 'Bastos', 3.88, 11.51)")
            .bind(id)
            .execute(storage.get_pool())
            .await
            .unwrap();
    }

    fn reading(bin_id: &str, fill_level: i32, timestamp: OffsetDateTime) -> SensorData {
        SensorData {
            id: 0,
            bin_id: bin_id.to_string(),
            fill_level,
            temperature: Some(29.0),
            battery: Some(80),
            lat: Some(3.88),
            lng: Some(11.51),
            timestamp,
        }
    }

    #[tokio::test]
    async fn test_latest_readings_newest_first_with_limit() {
        let storage = setup_test_db().await;
        create_test_bin(&storage, "BIN-001").await;
        let repo = SensorRecordRepository::new(storage.clone());
        let now = OffsetDateTime::now_utc();

        let mut tx = storage.get_pool().begin().await.unwrap();
        for (hours_ago, level) in [(3, 30), (2, 40), (1, 50)] {
            repo.create(&reading("BIN-001", level, now - Duration::hours(hours_ago)), &mut tx)
                .await
                .unwrap();
        }
        tx.commit().await.unwrap();

        let latest = repo.find_latest_by_bin_id("BIN-001", 2).await.unwrap();
        let levels: Vec<i32> = latest.iter().map(|r| r.fill_level).collect();
        assert_eq!(levels, vec![50, 40]);

        assert!(repo.find_latest_by_bin_id("BIN-002", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reading_for_unknown_bin_is_rejected() {
        let storage = setup_test_db().await;
        let repo = SensorRecordRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let result = repo
            .create(&reading("BIN-404", 10, OffsetDateTime::now_utc()), &mut tx)
            .await;

        assert!(result.is_err());
    }
}
