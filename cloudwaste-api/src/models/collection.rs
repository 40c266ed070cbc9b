use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{BinId, Id, TruckId};

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: Id,
    pub bin_id: BinId,
    pub truck_id: TruckId,
    pub driver_id: Id,
    #[serde(with = "time::serde::rfc3339")]
    pub collected_at: OffsetDateTime,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    /// Collected bin
    pub bin_id: BinId,
    /// Truck that emptied the bin
    pub truck_id: TruckId,
    /// Driver that confirmed the pickup
    pub driver_id: Id,
}

#[cfg_attr(feature = "docs", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "docs", into_params(parameter_in = Query))]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Trailing window in days, defaults to 7
    pub days: Option<i64>,
}

/// Number of collections on one calendar day (UTC).
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Day formatted as `YYYY-MM-DD`
    pub date: String,
    pub count: i64,
}
