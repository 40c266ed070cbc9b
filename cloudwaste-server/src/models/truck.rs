use cloudwaste_api::models as api;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Truck {
    pub id: String,
    pub driver_name: String,
    pub lat: f64,
    pub lng: f64,
    pub location: String,
    pub fuel_level: i32,
    pub gps_active: bool,
    pub status: String,
    pub last_update: Option<OffsetDateTime>,
}

impl From<Truck> for api::Truck {
    fn from(truck: Truck) -> Self {
        Self {
            id: truck.id,
            driver_name: truck.driver_name,
            lat: truck.lat,
            lng: truck.lng,
            location: truck.location,
            fuel_level: truck.fuel_level,
            gps_active: truck.gps_active,
            status: api::TruckStatus::from(truck.status),
            last_update: truck.last_update,
        }
    }
}

#[derive(Clone)]
pub struct TruckTable;

impl Table for TruckTable {
    fn name(&self) -> &'static str {
        "trucks"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS trucks (
                id TEXT PRIMARY KEY,
                driver_name TEXT NOT NULL,
                lat REAL NOT NULL,
                lng REAL NOT NULL,
                location TEXT NOT NULL DEFAULT '',
                fuel_level INTEGER NOT NULL DEFAULT 100,
                gps_active BOOLEAN NOT NULL DEFAULT 1,
                status TEXT NOT NULL DEFAULT 'idle',
                last_update TIMESTAMP
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS trucks;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
