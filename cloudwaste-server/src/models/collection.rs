use cloudwaste_api::models as api;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collection {
    pub id: i32,
    pub bin_id: String,
    pub truck_id: String,
    pub driver_id: i32,
    pub collected_at: OffsetDateTime,
}

/// Collections grouped by UTC calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyCount {
    pub date: String,
    pub count: i64,
}

impl From<Collection> for api::Collection {
    fn from(collection: Collection) -> Self {
        Self {
            id: collection.id,
            bin_id: collection.bin_id,
            truck_id: collection.truck_id,
            driver_id: collection.driver_id,
            collected_at: collection.collected_at,
        }
    }
}

impl From<DailyCount> for api::HistoryEntry {
    fn from(row: DailyCount) -> Self {
        Self {
            date: row.date,
            count: row.count,
        }
    }
}

#[derive(Clone)]
pub struct CollectionTable;

impl Table for CollectionTable {
    fn name(&self) -> &'static str {
        "collections"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS collections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                bin_id TEXT NOT NULL,
                truck_id TEXT NOT NULL,
                driver_id INTEGER NOT NULL,
                collected_at TIMESTAMP NOT NULL,
                FOREIGN KEY (bin_id) REFERENCES bins (id)
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS collections;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["bins"]
    }
}
