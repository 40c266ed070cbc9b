use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::Truck;

pub struct TruckRepository {
    storage: Arc<Storage>,
}

impl TruckRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl TruckRepository {
    #[cfg(test)]
    pub async fn create(
        &self,
        item: &Truck,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO trucks (id, driver_name, lat, lng, location, fuel_level, gps_active, status, last_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.driver_name)
        .bind(item.lat)
        .bind(item.lng)
        .bind(&item.location)
        .bind(item.fuel_level)
        .bind(item.gps_active)
        .bind(&item.status)
        .bind(item.last_update)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<Truck>, Error> {
        let trucks: Vec<Truck> = sqlx::query_as("SELECT * FROM trucks")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(trucks)
    }

    #[cfg(test)]
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Truck>, Error> {
        let truck: Option<Truck> = sqlx::query_as("SELECT * FROM trucks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(truck)
    }

    pub async fn update_location(
        &self,
        id: &str,
        lat: f64,
        lng: f64,
        location: &str,
        updated_at: OffsetDateTime,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE trucks
            SET lat = $1, lng = $2, location = $3, last_update = $4
            WHERE id = $5
            "#,
        )
        .bind(lat)
        .bind(lng)
        .bind(location)
        .bind(updated_at)
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

    #[tokio::test]
    async fn test_update_location_overwrites_position() {
        let storage = setup_test_db().await;
        let repo = TruckRepository::new(storage.clone());

        let truck = Truck {
            id: "TR001".to_string(),
            driver_name: "Jean Mbarga".to_string(),
            lat: 3.8667,
            lng: 11.5167,
            location: "Depot".to_string(),
            fuel_level: 75,
            gps_active: true,
            status: "active".to_string(),
            last_update: None,
        };

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.create(&truck, &mut tx).await.unwrap();
        let touched = repo
            .update_location("TR001", 3.8801, 11.5203, "Nlongkak", OffsetDateTime::now_utc(), &mut tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(touched, 1);

        let moved = repo.find_by_id("TR001").await.unwrap().unwrap();
        assert_eq!(moved.lat, 3.8801);
        assert_eq!(moved.lng, 11.5203);
        assert_eq!(moved.location, "Nlongkak");
        assert!(moved.gps_active);
        assert!(moved.last_update.is_some());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
