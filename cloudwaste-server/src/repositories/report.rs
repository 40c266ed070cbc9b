use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::{Report, ReportWithBin};

pub struct ReportRepository {
    storage: Arc<Storage>,
}

impl ReportRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl ReportRepository {
    pub async fn create(
        &self,
        item: &Report,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<Report, Error> {
        let report: Report = sqlx::query_as(
            r#"
            INSERT INTO reports (bin_id, reporter, issue, description, priority, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&item.bin_id)
        .bind(&item.reporter)
        .bind(&item.issue)
        .bind(&item.description)
        .bind(&item.priority)
        .bind(&item.status)
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(&mut **transaction)
        .await?;

        Ok(report)
    }

    #[cfg(test)]
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Report>, Error> {
        let report: Option<Report> = sqlx::query_as("SELECT * FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(report)
    }

    /// Every report with its bin's name and neighborhood, newest first.
    pub async fn find_all_with_bins(&self) -> Result<Vec<ReportWithBin>, Error> {
        let reports: Vec<ReportWithBin> = sqlx::query_as(
            r#"
            SELECT r.*, b.name AS bin_name, b.neighborhood AS neighborhood
            FROM reports r
            LEFT JOIN bins b ON r.bin_id = b.id
            ORDER BY julianday(r.created_at) DESC, r.id DESC
            "#,
        )
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(reports)
    }

    // Unknown ids are silently ignored
    pub async fn update_status(
        &self,
        id: i32,
        status: &str,
        updated_at: OffsetDateTime,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, Error> {
        let result = sqlx::query("UPDATE reports SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status)
            .bind(updated_at)
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use crate::repositories::tests::setup_test_db;

    use super::*;

    fn report(bin_id: Option<&str>, issue: &str, created_at: OffsetDateTime) -> Report {
        Report {
            id: 0,
            bin_id: bin_id.map(String::from),
            reporter: "Anonymous".to_string(),
            issue: issue.to_string(),
            description: "full".to_string(),
            priority: "medium".to_string(),
            status: "pending".to_string(),
            created_at,
            updated_at: Some(created_at),
        }
    }

    #[tokio::test]
    async fn test_reports_are_joined_with_bins_newest_first() {
        let storage = setup_test_db().await;
        sqlx::query("INSERT INTO bins (id, name, neighborhood, lat, lng) VALUES ('BIN-001', 'Marché Central', 'Centre', 3.86, 11.52)")
            .execute(storage.get_pool())
            .await
            .unwrap();
        let repo = ReportRepository::new(storage.clone());
        let now = OffsetDateTime::now_utc();

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.create(&report(Some("BIN-001"), "Overflowing bin", now - Duration::hours(2)), &mut tx)
            .await
            .unwrap();
        repo.create(&report(Some("BIN-999"), "Damaged lid", now), &mut tx)
            .await
            .unwrap();
        repo.create(&report(None, "Illegal dumping", now - Duration::hours(1)), &mut tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let reports = repo.find_all_with_bins().await.unwrap();
        let issues: Vec<&str> = reports.iter().map(|r| r.report.issue.as_str()).collect();
        assert_eq!(issues, vec!["Damaged lid", "Illegal dumping", "Overflowing bin"]);

        assert_eq!(reports[0].bin_name, None);
        assert_eq!(reports[2].bin_name.as_deref(), Some("Marché Central"));
        assert_eq!(reports[2].neighborhood.as_deref(), Some("Centre"));
    }

    #[tokio::test]
    async fn test_update_status_accepts_any_value() {
        let storage = setup_test_db().await;
        let repo = ReportRepository::new(storage.clone());
        let created_at = OffsetDateTime::now_utc() - Duration::days(1);

        let mut tx = storage.get_pool().begin().await.unwrap();
        let created = repo
            .create(&report(None, "Overflowing bin", created_at), &mut tx)
            .await
            .unwrap();
        let touched = repo
            .update_status(created.id, "escalated", OffsetDateTime::now_utc(), &mut tx)
            .await
            .unwrap();
        let missing = repo
            .update_status(created.id + 100, "resolved", OffsetDateTime::now_utc(), &mut tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(touched, 1);
        assert_eq!(missing, 0);

        let updated = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(updated.status, "escalated");
        assert!(updated.updated_at.unwrap() > created_at);
    }
}
