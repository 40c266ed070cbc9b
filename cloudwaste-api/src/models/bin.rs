use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{BinId, Id};

/// Fill level (percent) from which a bin is reported as `warning`.
pub const WARNING_THRESHOLD: i32 = 60;

/// Fill level (percent) from which a bin is reported as `critical`.
pub const CRITICAL_THRESHOLD: i32 = 80;

/// Fill level a bin is reset to once a collection is recorded.
pub const COLLECTED_FILL_LEVEL: i32 = 5;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinStatus {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl BinStatus {
    /// Classifies a fill level. Only the latest reading counts, there is no
    /// hysteresis between consecutive readings.
    pub fn from_fill_level(fill_level: i32) -> Self {
        if fill_level >= CRITICAL_THRESHOLD {
            BinStatus::Critical
        } else if fill_level >= WARNING_THRESHOLD {
            BinStatus::Warning
        } else {
            BinStatus::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinStatus::Normal => "normal",
            BinStatus::Warning => "warning",
            BinStatus::Critical => "critical",
        }
    }

    /// Whether the bin belongs on a collection route.
    pub fn needs_collection(&self) -> bool {
        matches!(self, BinStatus::Warning | BinStatus::Critical)
    }
}

impl From<String> for BinStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "critical" => BinStatus::Critical,
            "warning" => BinStatus::Warning,
            _ => BinStatus::Normal,
        }
    }
}

impl fmt::Display for BinStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Bin identifier
    pub id: BinId,
    /// Display name
    pub name: String,
    /// Neighborhood the bin stands in
    pub neighborhood: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Fill level percentage
    pub fill_level: i32,
    /// Internal temperature in Celsius
    pub temperature: Option<f64>,
    /// Battery level percentage
    pub battery: Option<i32>,
    /// Status derived from the last fill level written
    pub status: BinStatus,
    /// Time of the last sensor write
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub last_update: Option<OffsetDateTime>,
    /// Time of the last recorded collection
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub last_collection: Option<OffsetDateTime>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDataRequest {
    /// Fill level percentage, not range checked
    pub fill_level: i32,
    /// Internal temperature in Celsius
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Battery level percentage
    #[serde(default)]
    pub battery: Option<i32>,
    /// Reported latitude
    #[serde(default)]
    pub lat: Option<f64>,
    /// Reported longitude
    #[serde(default)]
    pub lng: Option<f64>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorDataResponse {
    pub success: bool,
    pub message: String,
    /// Status derived from the ingested fill level
    pub status: BinStatus,
}

/// One telemetry sample as stored in the append-only reading log.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: Id,
    pub bin_id: BinId,
    pub fill_level: i32,
    pub temperature: Option<f64>,
    pub battery: Option<i32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[cfg_attr(feature = "docs", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "docs", into_params(parameter_in = Query))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ReadingsQuery {
    /// Maximum number of readings, newest first
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(BinStatus::from_fill_level(0), BinStatus::Normal);
        assert_eq!(BinStatus::from_fill_level(59), BinStatus::Normal);
        assert_eq!(BinStatus::from_fill_level(60), BinStatus::Warning);
        assert_eq!(BinStatus::from_fill_level(79), BinStatus::Warning);
        assert_eq!(BinStatus::from_fill_level(80), BinStatus::Critical);
        assert_eq!(BinStatus::from_fill_level(100), BinStatus::Critical);
    }

    #[test]
    fn test_status_passes_through_out_of_range_levels() {
        assert_eq!(BinStatus::from_fill_level(150), BinStatus::Critical);
        assert_eq!(BinStatus::from_fill_level(-10), BinStatus::Normal);
    }

    #[test]
    fn test_needs_collection() {
        assert!(BinStatus::Critical.needs_collection());
        assert!(BinStatus::Warning.needs_collection());
        assert!(!BinStatus::Normal.needs_collection());
    }

    #[test]
    fn test_sensor_request_optional_fields() {
        let request: SensorDataRequest =
            serde_json::from_str(r#"{"fill_level": 85, "temperature": 30, "battery": 50}"#).unwrap();

        assert_eq!(request.fill_level, 85);
        assert_eq!(request.temperature, Some(30.0));
        assert_eq!(request.battery, Some(50));
        assert!(request.lat.is_none());
        assert!(request.lng.is_none());
    }

    #[test]
    fn test_bin_timestamps_are_rfc3339() {
        let bin = Bin {
            id: "B1".to_string(),
            name: "Marché Mokolo".to_string(),
            neighborhood: "Mokolo".to_string(),
            lat: 3.8721,
            lng: 11.4995,
            fill_level: 42,
            temperature: None,
            battery: Some(90),
            status: BinStatus::Normal,
            last_update: Some(time::macros::datetime!(2026-10-16 08:30:00 UTC)),
            last_collection: None,
        };

        let value = serde_json::to_value(&bin).unwrap();
        assert_eq!(value["last_update"], "2026-10-16T08:30:00Z");
        assert_eq!(value["last_collection"], serde_json::Value::Null);
        assert_eq!(value["status"], "normal");
    }
}
