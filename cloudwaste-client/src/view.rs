use std::borrow::Cow;

use cloudwaste_api::models::{Bin, ReportDetail, Stats, Truck, TruckStatus};
use time::OffsetDateTime;

use crate::state::{DashboardState, Role};

const RECENT_REPORTS: usize = 5;
const CITIZEN_BINS: usize = 5;
const NO_TRUCK_ASSIGNED: &str = "No truck assigned";

#[derive(Debug, PartialEq)]
pub struct ManagerView<'a> {
    pub stats: &'a Stats,
    /// Number of critical bins, present only when at least one exists
    pub critical_alert: Option<i64>,
    pub bins: &'a [Bin],
    pub trucks: &'a [Truck],
    pub recent_reports: &'a [ReportDetail],
}

#[derive(Debug, PartialEq)]
pub struct DriverView<'a> {
    pub truck: Cow<'a, Truck>,
    pub priority_bins: Vec<&'a Bin>,
}

#[derive(Debug, PartialEq)]
pub struct CitizenView<'a> {
    pub nearby_bins: &'a [Bin],
    pub recent_reports: &'a [ReportDetail],
}

#[derive(Debug, PartialEq)]
pub enum RoleView<'a> {
    Manager(ManagerView<'a>),
    Driver(DriverView<'a>),
    Citizen(CitizenView<'a>),
}

/// Projects the shared state onto the view of the selected role.
pub fn project(state: &DashboardState) -> RoleView<'_> {
    match state.role {
        Role::Manager => RoleView::Manager(manager_view(state)),
        Role::Driver => RoleView::Driver(driver_view(state)),
        Role::Citizen => RoleView::Citizen(citizen_view(state)),
    }
}

pub fn manager_view(state: &DashboardState) -> ManagerView<'_> {
    ManagerView {
        stats: &state.stats,
        critical_alert: (state.stats.critical_bins > 0).then_some(state.stats.critical_bins),
        bins: &state.bins,
        trucks: &state.trucks,
        recent_reports: head(&state.reports, RECENT_REPORTS),
    }
}

pub fn driver_view(state: &DashboardState) -> DriverView<'_> {
    let truck = state
        .trucks
        .first()
        .map(Cow::Borrowed)
        .unwrap_or_else(|| Cow::Owned(placeholder_truck()));

    DriverView {
        truck,
        priority_bins: state
            .bins
            .iter()
            .filter(|bin| bin.status.needs_collection())
            .collect(),
    }
}

pub fn citizen_view(state: &DashboardState) -> CitizenView<'_> {
    CitizenView {
        nearby_bins: head(&state.bins, CITIZEN_BINS),
        recent_reports: head(&state.reports, RECENT_REPORTS),
    }
}

fn head<T>(items: &[T], count: usize) -> &[T] {
    &items[..items.len().min(count)]
}

fn placeholder_truck() -> Truck {
    Truck {
        id: String::from(NO_TRUCK_ASSIGNED),
        driver_name: String::from("Driver"),
        lat: 0.0,
        lng: 0.0,
        location: String::new(),
        fuel_level: 0,
        gps_active: false,
        status: TruckStatus::Idle,
        last_update: None,
    }
}

/// Human friendly age of a timestamp, "Never" when absent.
pub fn relative_time(timestamp: Option<OffsetDateTime>, now: OffsetDateTime) -> String {
    let Some(timestamp) = timestamp else {
        return String::from("Never");
    };

    let elapsed = now - timestamp;
    let minutes = elapsed.whole_minutes();
    let hours = elapsed.whole_hours();
    let days = elapsed.whole_days();

    if minutes < 1 {
        String::from("Just now")
    } else if minutes < 60 {
        format!("{minutes} minutes ago")
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else if days == 1 {
        String::from("Yesterday")
    } else if days < 7 {
        format!("{days} days ago")
    } else {
        format!(
            "{}/{}/{}",
            u8::from(timestamp.month()),
            timestamp.day(),
            timestamp.year()
        )
    }
}

/// Wall clock `HH:MM` of a timestamp in UTC.
pub fn clock_time(timestamp: OffsetDateTime) -> String {
    let utc = timestamp.to_offset(time::UtcOffset::UTC);
    format!("{:02}:{:02}", utc.hour(), utc.minute())
}
