use std::fmt::Write;

use cloudwaste_api::models::{Bin, ReportDetail};
use time::OffsetDateTime;

use crate::state::{ConnectionStatus, DashboardState};
use crate::view::{CitizenView, DriverView, ManagerView, RoleView, clock_time, project, relative_time};

/// Renders the selected role view as plain text.
pub fn render(state: &DashboardState, now: OffsetDateTime) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== CloudWaste Yaoundé ({}) ==", state.role);
    match state.connection {
        ConnectionStatus::Connected => {
            let last_sync = state.last_sync.map(clock_time).unwrap_or_else(|| String::from("--:--"));
            let _ = writeln!(out, "Cloud Connected | Last sync: {}", last_sync);
        }
        ConnectionStatus::Connecting => {
            let _ = writeln!(out, "Connecting to cloud database...");
        }
        ConnectionStatus::Disconnected => {
            let _ = writeln!(out, "Connection Lost | Attempting to reconnect...");
            if let Some(error) = &state.error {
                let _ = writeln!(out, "  {}", error);
            }
        }
    }

    match project(state) {
        RoleView::Manager(view) => render_manager(&mut out, &view, now),
        RoleView::Driver(view) => render_driver(&mut out, &view, now),
        RoleView::Citizen(view) => render_citizen(&mut out, &view, now),
    }

    if let Some(bin) = state.selected_bin() {
        let _ = writeln!(out, "\n-- Selected: {} ({}) --", bin.name, bin.id);
        let _ = writeln!(
            out,
            "  fill {}% | {} | battery {} | temperature {} | last update {}",
            bin.fill_level,
            bin.status,
            bin.battery.map(|b| format!("{b}%")).unwrap_or_else(|| String::from("n/a")),
            bin.temperature.map(|t| format!("{t:.1}°C")).unwrap_or_else(|| String::from("n/a")),
            relative_time(bin.last_update, now)
        );
    }

    out
}

fn render_manager(out: &mut String, view: &ManagerView<'_>, now: OffsetDateTime) {
    let stats = view.stats;
    let _ = writeln!(
        out,
        "Total bins {} | Critical {} | Active trucks {} | Today {} | Reports {}",
        stats.total_bins, stats.critical_bins, stats.active_trucks, stats.collections_today, stats.pending_reports
    );

    if let Some(critical) = view.critical_alert {
        let _ = writeln!(
            out,
            "!! Urgent Action Required: {} bins are at critical capacity (type `optimize`)",
            critical
        );
    }

    let _ = writeln!(out, "\n-- Live Bins Status --");
    if view.bins.is_empty() {
        let _ = writeln!(out, "  No bins found. Check your database connection.");
    }
    for bin in view.bins {
        write_bin(out, bin, now);
    }

    let _ = writeln!(out, "\n-- Collection Trucks --");
    if view.trucks.is_empty() {
        let _ = writeln!(out, "  No trucks found");
    }
    for truck in view.trucks {
        let _ = writeln!(
            out,
            "  {} {:<20} {:<8} fuel {:>3}% at {} ({})",
            truck.id,
            truck.driver_name,
            truck.status.as_str(),
            truck.fuel_level,
            truck.location,
            relative_time(truck.last_update, now)
        );
    }

    write_reports(out, view.recent_reports, now);
}

fn render_driver(out: &mut String, view: &DriverView<'_>, now: OffsetDateTime) {
    let truck = &view.truck;
    let _ = writeln!(
        out,
        "Truck {} | {} | {} | fuel {}%",
        truck.id,
        truck.driver_name,
        truck.status.as_str(),
        truck.fuel_level
    );

    let _ = writeln!(out, "\n-- Priority Collections ({}) --", view.priority_bins.len());
    if view.priority_bins.is_empty() {
        let _ = writeln!(out, "  All caught up! No urgent collections.");
    }
    for (index, bin) in view.priority_bins.iter().enumerate() {
        let _ = write!(out, "{:>2}.", index + 1);
        write_bin(out, bin, now);
    }
}

fn render_citizen(out: &mut String, view: &CitizenView<'_>, now: OffsetDateTime) {
    let _ = writeln!(out, "\n-- Bins Near You --");
    for bin in view.nearby_bins {
        write_bin(out, bin, now);
    }

    write_reports(out, view.recent_reports, now);
}

fn write_bin(out: &mut String, bin: &Bin, now: OffsetDateTime) {
    let _ = writeln!(
        out,
        "  {:<8} {:<28} {:>3}% {:<8} {:<12} collected {}",
        bin.id,
        bin.name,
        bin.fill_level,
        bin.status.as_str(),
        bin.neighborhood,
        relative_time(bin.last_collection, now)
    );
}

fn write_reports(out: &mut String, reports: &[ReportDetail], now: OffsetDateTime) {
    let _ = writeln!(out, "\n-- Recent Reports --");
    if reports.is_empty() {
        let _ = writeln!(out, "  No reports yet");
    }
    for detail in reports {
        let report = &detail.report;
        let _ = writeln!(
            out,
            "  #{} {} [{}] {} | {} | {}",
            report.id,
            report.issue,
            report.status,
            detail.bin_name.as_deref().unwrap_or("Unknown bin"),
            detail.neighborhood.as_deref().unwrap_or("-"),
            relative_time(Some(report.created_at), now)
        );
    }
}
