use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::BinId;

/// Dashboard counters, read as one snapshot.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_bins: i64,
    pub critical_bins: i64,
    pub active_trucks: i64,
    pub pending_reports: i64,
    pub collections_today: i64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub bin_id: BinId,
    pub bin_name: String,
    /// Neighborhood of the bin
    pub location: String,
    pub fill_level: i32,
    pub coordinates: Coordinates,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub success: bool,
    /// Stops in visiting order
    pub route: Vec<RouteStop>,
    pub total_bins: usize,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub service: String,
}
