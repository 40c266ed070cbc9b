use cloudwaste_api::models as api;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

/// One raw telemetry sample as received from a bin.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SensorData {
    pub id: i32,
    pub bin_id: String,
    pub fill_level: i32,
    pub temperature: Option<f64>,
    pub battery: Option<i32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub timestamp: OffsetDateTime,
}

impl From<SensorData> for api::SensorReading {
    fn from(data: SensorData) -> Self {
        Self {
            id: data.id,
            bin_id: data.bin_id,
            fill_level: data.fill_level,
            temperature: data.temperature,
            battery: data.battery,
            lat: data.lat,
            lng: data.lng,
            timestamp: data.timestamp,
        }
    }
}

#[derive(Clone)]
pub struct SensorDataTable;

impl Table for SensorDataTable {
    fn name(&self) -> &'static str {
        "sensor_data"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS sensor_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                bin_id TEXT NOT NULL,
                fill_level INTEGER NOT NULL,
                temperature REAL,
                battery INTEGER,
                lat REAL,
                lng REAL,
                timestamp TIMESTAMP NOT NULL,
                FOREIGN KEY (bin_id) REFERENCES bins (id)
            );
            CREATE INDEX IF NOT EXISTS idx_sensor_data_bin_time ON sensor_data (bin_id, timestamp);
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS sensor_data;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["bins"]
    }
}
