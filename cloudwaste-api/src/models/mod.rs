mod analytics;
mod bin;
mod collection;
mod report;
mod truck;

pub use analytics::*;
pub use bin::*;
pub use collection::*;
pub use report::*;
pub use truck::*;

use serde::{Deserialize, Serialize};

pub type Id = i32;

/// Bins are addressed by their hardware label, e.g. `BIN-001`.
pub type BinId = String;

/// Trucks are addressed by their fleet label, e.g. `TR001`.
pub type TruckId = String;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable error kind
    pub error: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
