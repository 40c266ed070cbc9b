use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::TruckId;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruckStatus {
    Active,
    #[default]
    Idle,
}

impl TruckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TruckStatus::Active => "active",
            TruckStatus::Idle => "idle",
        }
    }
}

impl From<String> for TruckStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => TruckStatus::Active,
            _ => TruckStatus::Idle,
        }
    }
}

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    /// Truck identifier
    pub id: TruckId,
    /// Assigned driver
    pub driver_name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Human readable location label
    pub location: String,
    /// Fuel level percentage
    pub fuel_level: i32,
    /// Whether the GPS unit is reporting
    pub gps_active: bool,
    /// Duty status
    pub status: TruckStatus,
    /// Time of the last location write
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub last_update: Option<OffsetDateTime>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckLocationRequest {
    pub lat: f64,
    pub lng: f64,
    /// Location label shown on the dashboard
    pub location_name: String,
}
