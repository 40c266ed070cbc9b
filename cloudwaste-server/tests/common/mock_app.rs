#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use cloudwaste_server::app::build_router;
use cloudwaste_server::configs::{Database, SchemaManager, Storage};
use cloudwaste_server::models::{Bin, Truck};
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tower::ServiceExt;

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let router = build_router(storage.clone());

        Self { storage, router }
    }

    pub async fn create_test_bin(&self, id: &str, neighborhood: &str, fill_level: i32) -> Bin {
        sqlx::query_as::<_, Bin>(
            r#"
            INSERT INTO bins (id, name, neighborhood, lat, lng, fill_level, status)
                VALUES ($1, $2, $3, 3.8800, 11.5200, $4, $5)
                RETURNING *;
            "#,
        )
        .bind(id)
        .bind(format!("{neighborhood} {id}"))
        .bind(neighborhood)
        .bind(fill_level)
        .bind(cloudwaste_api::models::BinStatus::from_fill_level(fill_level).as_str())
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn create_test_truck(&self, id: &str, status: &str) -> Truck {
        sqlx::query_as::<_, Truck>(
            r#"
            INSERT INTO trucks (id, driver_name, lat, lng, location, fuel_level, gps_active, status)
                VALUES ($1, 'Test Driver', 3.8790, 11.5190, 'Depot', 80, 1, $2)
                RETURNING *;
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(self.storage.get_pool())
        .await
        .unwrap()
    }

    pub async fn create_test_collection(&self, bin_id: &str, collected_at: OffsetDateTime) {
        sqlx::query(
            r#"
            INSERT INTO collections (bin_id, truck_id, driver_id, collected_at)
                VALUES ($1, 'TR001', 2, $2);
            "#,
        )
        .bind(bin_id)
        .bind(collected_at)
        .execute(self.storage.get_pool())
        .await
        .unwrap();
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .uri(uri)
            .method(method)
            .header("Content-Type", "application/json")
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, bytes.to_vec())
    }

    pub async fn get<T: DeserializeOwned>(&self, uri: &str) -> (StatusCode, T) {
        let (status, bytes) = self.send(Method::GET, uri, None).await;

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, uri: &str, body: &B) -> (StatusCode, T) {
        let (status, bytes) = self
            .send(Method::POST, uri, Some(serde_json::to_string(body).unwrap()))
            .await;

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, uri: &str, body: &B) -> (StatusCode, T) {
        let (status, bytes) = self
            .send(Method::PATCH, uri, Some(serde_json::to_string(body).unwrap()))
            .await;

        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
