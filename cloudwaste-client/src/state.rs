use std::fmt;
use std::str::FromStr;

use cloudwaste_api::models::{Bin, BinId, ReportDetail, Stats, Truck};
use time::OffsetDateTime;

pub const DEFAULT_ISSUE: &str = "Overflowing bin";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[default]
    Manager,
    Driver,
    Citizen,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Driver => "driver",
            Role::Citizen => "citizen",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "manager" => Ok(Role::Manager),
            "driver" => Ok(Role::Driver),
            "citizen" => Ok(Role::Citizen),
            other => Err(format!("unknown role {other}, expected manager, driver or citizen")),
        }
    }
}

/// The citizen report form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub bin_id: Option<BinId>,
    pub issue: String,
    pub description: String,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            bin_id: None,
            issue: String::from(DEFAULT_ISSUE),
            description: String::new(),
        }
    }
}

impl ReportDraft {
    /// A draft can be sent once it names a bin and describes the problem.
    pub fn is_complete(&self) -> bool {
        self.bin_id.as_deref().is_some_and(|id| !id.is_empty()) && !self.description.trim().is_empty()
    }
}

/// Everything the dashboard shows, filled by poll cycles and user actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub connection: ConnectionStatus,
    pub bins: Vec<Bin>,
    pub reports: Vec<ReportDetail>,
    pub trucks: Vec<Truck>,
    pub stats: Stats,
    pub last_sync: Option<OffsetDateTime>,
    pub error: Option<String>,
    pub role: Role,
    pub selected_bin: Option<BinId>,
    pub show_report_form: bool,
    pub report_draft: ReportDraft,
}

impl DashboardState {
    pub fn selected_bin(&self) -> Option<&Bin> {
        let selected = self.selected_bin.as_deref()?;
        self.bins.iter().find(|bin| bin.id == selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("Driver".parse::<Role>(), Ok(Role::Driver));
        assert_eq!("citizen".parse::<Role>(), Ok(Role::Citizen));
        assert!("mayor".parse::<Role>().is_err());
    }

    #[test]
    fn test_draft_requires_bin_and_description() {
        let mut draft = ReportDraft::default();
        assert_eq!(draft.issue, "Overflowing bin");
        assert!(!draft.is_complete());

        draft.bin_id = Some("BIN-001".to_string());
        assert!(!draft.is_complete());

        draft.description = "   ".to_string();
        assert!(!draft.is_complete());

        draft.description = "Bags on the street".to_string();
        assert!(draft.is_complete());
    }

    #[test]
    fn test_initial_state_is_connecting_manager() {
        let state = DashboardState::default();

        assert_eq!(state.connection, ConnectionStatus::Connecting);
        assert_eq!(state.role, Role::Manager);
        assert!(state.selected_bin().is_none());
    }
}
