use cloudwaste_api::models as api;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bin {
    pub id: String,
    pub name: String,
    pub neighborhood: String,
    pub lat: f64,
    pub lng: f64,
    pub fill_level: i32,
    pub temperature: Option<f64>,
    pub battery: Option<i32>,
    pub status: String,
    pub last_update: Option<OffsetDateTime>,
    pub last_collection: Option<OffsetDateTime>,
}

impl From<Bin> for api::Bin {
    fn from(bin: Bin) -> Self {
        Self {
            id: bin.id,
            name: bin.name,
            neighborhood: bin.neighborhood,
            lat: bin.lat,
            lng: bin.lng,
            fill_level: bin.fill_level,
            temperature: bin.temperature,
            battery: bin.battery,
            status: api::BinStatus::from(bin.status),
            last_update: bin.last_update,
            last_collection: bin.last_collection,
        }
    }
}

#[derive(Clone)]
pub struct BinTable;

impl Table for BinTable {
    fn name(&self) -> &'static str {
        "bins"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS bins (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                neighborhood TEXT NOT NULL,
                lat REAL NOT NULL,
                lng REAL NOT NULL,
                fill_level INTEGER NOT NULL DEFAULT 0,
                temperature REAL,
                battery INTEGER,
                status TEXT NOT NULL DEFAULT 'normal',
                last_update TIMESTAMP,
                last_collection TIMESTAMP
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS bins;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
