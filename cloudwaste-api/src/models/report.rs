use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{BinId, Id};

/// Reporter stored when a citizen does not give a name.
pub const ANONYMOUS_REPORTER: &str = "Anonymous";

/// Lifecycle of a citizen report. Values outside the known set are kept
/// verbatim, the API does not police status transitions.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Other(String),
}

impl ReportStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in-progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Other(value) => value,
        }
    }
}

impl From<String> for ReportStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => ReportStatus::Pending,
            "in-progress" => ReportStatus::InProgress,
            "resolved" => ReportStatus::Resolved,
            _ => ReportStatus::Other(value),
        }
    }
}

impl From<ReportStatus> for String {
    fn from(value: ReportStatus) -> Self {
        match value {
            ReportStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other(value) => value,
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Other(value),
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report identifier
    pub id: Id,
    /// Reported bin, may point to a bin that no longer exists
    pub bin_id: Option<BinId>,
    /// Reporter name
    pub reporter: String,
    /// Short issue label, e.g. "Overflowing bin"
    pub issue: String,
    /// Free text description
    pub description: String,
    /// Report priority
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub priority: Priority,
    /// Report status
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub status: ReportStatus,
    /// Creation time
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last status change
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub updated_at: Option<OffsetDateTime>,
}

/// A report joined with the name and neighborhood of its bin.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDetail {
    #[serde(flatten)]
    pub report: Report,
    /// Name of the reported bin
    pub bin_name: Option<String>,
    /// Neighborhood of the reported bin
    pub neighborhood: Option<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReportRequest {
    /// Reported bin
    pub bin_id: Option<BinId>,
    /// Reporter name, defaults to "Anonymous"
    #[serde(default)]
    pub reporter: Option<String>,
    /// Issue label
    pub issue: String,
    /// Free text description
    pub description: String,
    /// Priority, defaults to "medium"
    #[serde(default)]
    #[cfg_attr(feature = "docs", schema(value_type = Option<String>))]
    pub priority: Option<Priority>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReportResponse {
    pub success: bool,
    pub report: Report,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReportRequest {
    /// New status, stored as given
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub status: ReportStatus,
}
