use cloudwaste_api::models as api;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Report {
    pub id: i32,
    pub bin_id: Option<String>,
    pub reporter: String,
    pub issue: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

/// A report joined with the bin it names, if that bin exists.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReportWithBin {
    #[sqlx(flatten)]
    pub report: Report,
    pub bin_name: Option<String>,
    pub neighborhood: Option<String>,
}

impl From<Report> for api::Report {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            bin_id: report.bin_id,
            reporter: report.reporter,
            issue: report.issue,
            description: report.description,
            priority: api::Priority::from(report.priority),
            status: api::ReportStatus::from(report.status),
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

impl From<ReportWithBin> for api::ReportDetail {
    fn from(row: ReportWithBin) -> Self {
        Self {
            report: row.report.into(),
            bin_name: row.bin_name,
            neighborhood: row.neighborhood,
        }
    }
}

#[derive(Clone)]
pub struct ReportTable;

impl Table for ReportTable {
    fn name(&self) -> &'static str {
        "reports"
    }

    // bin_id is free text: citizens may report bins that are not registered.
    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS reports (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                bin_id TEXT,
                reporter TEXT NOT NULL DEFAULT 'Anonymous',
                issue TEXT NOT NULL,
                description TEXT NOT NULL,
                priority TEXT NOT NULL DEFAULT 'medium',
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS reports;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
