use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::{Bin, SensorData};

pub struct BinRepository {
    storage: Arc<Storage>,
}

impl BinRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl BinRepository {
    #[cfg(test)]
    pub async fn create(
        &self,
        item: &Bin,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO bins (id, name, neighborhood, lat, lng, fill_level, temperature, battery, status, last_update, last_collection)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.neighborhood)
        .bind(item.lat)
        .bind(item.lng)
        .bind(item.fill_level)
        .bind(item.temperature)
        .bind(item.battery)
        .bind(&item.status)
        .bind(item.last_update)
        .bind(item.last_collection)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<Bin>, Error> {
        let bins: Vec<Bin> = sqlx::query_as("SELECT * FROM bins ORDER BY fill_level DESC")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(bins)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Bin>, Error> {
        let bin: Option<Bin> = sqlx::query_as("SELECT * FROM bins WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(bin)
    }

    pub async fn find_by_neighborhood(&self, neighborhood: &str) -> Result<Vec<Bin>, Error> {
        let bins: Vec<Bin> = sqlx::query_as("SELECT * FROM bins WHERE neighborhood = $1")
            .bind(neighborhood)
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(bins)
    }

    /// Bins in warning or critical state, fullest first.
    pub async fn find_needing_collection(&self) -> Result<Vec<Bin>, Error> {
        let bins: Vec<Bin> = sqlx::query_as(
            r#"
            SELECT * FROM bins
            WHERE status IN ('critical', 'warning')
            ORDER BY fill_level DESC
            "#,
        )
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(bins)
    }

    /// Copies a reading onto its bin; returns the number of rows touched.
    pub async fn update_telemetry(
        &self,
        reading: &SensorData,
        status: &str,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE bins
            SET fill_level = $1, temperature = $2, battery = $3, status = $4, last_update = $5
            WHERE id = $6
            "#,
        )
        .bind(reading.fill_level)
        .bind(reading.temperature)
        .bind(reading.battery)
        .bind(status)
        .bind(reading.timestamp)
        .bind(&reading.bin_id)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn reset_after_collection(
        &self,
        id: &str,
        fill_level: i32,
        status: &str,
        collected_at: OffsetDateTime,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE bins
            SET fill_level = $1, status = $2, last_collection = $3
            WHERE id = $4
            "#,
        )
        .bind(fill_level)
        .bind(status)
        .bind(collected_at)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use crate::repositories::tests::setup_test_db;

    use super::*;

    fn bin(id: &str, neighborhood: &str, fill_level: i32, status: &str) -> Bin {
        Bin {
            id: id.to_string(),
            name: format!("{id} {neighborhood}"),
            neighborhood: neighborhood.to_string(),
            lat: 3.8667,
            lng: 11.5167,
            fill_level,
            temperature: Some(28.0),
            battery: Some(90),
            status: status.to_string(),
            last_update: None,
            last_collection: None,
        }
    }

    async fn seed(repo: &BinRepository, bins: &[Bin]) {
        let mut tx = repo.get_pool().begin().await.unwrap();
        for item in bins {
            repo.create(item, &mut tx).await.unwrap();
        }
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_find_all_orders_by_fill_level() {
        let repo = BinRepository::new(setup_test_db().await);
        seed(
            &repo,
            &[
                bin("BIN-001", "Bastos", 20, "normal"),
                bin("BIN-002", "Mokolo", 90, "critical"),
                bin("BIN-003", "Bastos", 65, "warning"),
            ],
        )
        .await;

        let levels: Vec<i32> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|b| b.fill_level)
            .collect();

        assert_eq!(levels, vec![90, 65, 20]);
    }

    #[tokio::test]
    async fn test_find_by_neighborhood_and_missing_id() {
        let repo = BinRepository::new(setup_test_db().await);
        seed(
            &repo,
            &[
                bin("BIN-001", "Bastos", 20, "normal"),
                bin("BIN-002", "Mokolo", 90, "critical"),
            ],
        )
        .await;

        assert_eq!(repo.find_by_neighborhood("Bastos").await.unwrap().len(), 1);
        assert!(repo.find_by_neighborhood("Essos").await.unwrap().is_empty());
        assert!(repo.find_by_id("BIN-404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_needing_collection_skips_normal_bins() {
        let repo = BinRepository::new(setup_test_db().await);
        seed(
            &repo,
            &[
                bin("BIN-001", "Bastos", 20, "normal"),
                bin("BIN-002", "Mokolo", 70, "warning"),
                bin("BIN-003", "Essos", 95, "critical"),
            ],
        )
        .await;

        let ids: Vec<String> = repo
            .find_needing_collection()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();

        assert_eq!(ids, vec!["BIN-003", "BIN-002"]);
    }

    #[tokio::test]
    async fn test_update_telemetry_and_reset() {
        let repo = BinRepository::new(setup_test_db().await);
        seed(&repo, &[bin("BIN-001", "Bastos", 20, "normal")]).await;
        let now = OffsetDateTime::now_utc();

        let reading = SensorData {
            id: 0,
            bin_id: "BIN-001".to_string(),
            fill_level: 85,
            temperature: Some(31.5),
            battery: Some(50),
            lat: None,
            lng: None,
            timestamp: now,
        };

        let mut tx = repo.get_pool().begin().await.unwrap();
        let touched = repo
            .update_telemetry(&reading, "critical", &mut tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();
        assert_eq!(touched, 1);

        let updated = repo.find_by_id("BIN-001").await.unwrap().unwrap();
        assert_eq!(updated.fill_level, 85);
        assert_eq!(updated.status, "critical");
        assert_eq!(updated.battery, Some(50));
        assert!(updated.last_update.is_some());

        let mut tx = repo.get_pool().begin().await.unwrap();
        repo.reset_after_collection("BIN-001", 5, "normal", now, &mut tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let reset = repo.find_by_id("BIN-001").await.unwrap().unwrap();
        assert_eq!(reset.fill_level, 5);
        assert_eq!(reset.status, "normal");
        assert!(reset.last_collection.is_some());
    }
}
