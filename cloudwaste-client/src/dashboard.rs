use std::sync::Arc;
use std::time::Duration;

use cloudwaste_api::models::{BinId, CreateCollectionRequest, CreateReportRequest, Id, Priority};
use time::OffsetDateTime;
use tokio::sync::{RwLock, RwLockReadGuard, watch};
use tokio::time::{MissedTickBehavior, interval};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::state::{ConnectionStatus, DashboardState, ReportDraft, Role};

/// Truck used for collections when none has been fetched yet.
pub const FALLBACK_TRUCK_ID: &str = "TR001";

/// Feedback for the user after an action. An alert must be acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Alert(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(message) | Notice::Alert(message) => message,
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, Notice::Alert(_))
    }
}

#[derive(Clone)]
pub struct Dashboard {
    client: Arc<ApiClient>,
    state: Arc<RwLock<DashboardState>>,
    revision: Arc<watch::Sender<u64>>,
    driver_id: Id,
}

impl Dashboard {
    pub fn new(client: ApiClient, driver_id: Id) -> Self {
        let (revision, _) = watch::channel(0);

        Self {
            client: Arc::new(client),
            state: Arc::new(RwLock::new(DashboardState::default())),
            revision: Arc::new(revision),
            driver_id,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn state(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().await
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Receives a new revision after every finished poll cycle or local change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Runs one poll cycle. Slices are stored as they arrive; the first
    /// failure marks the dashboard disconnected and skips the remaining fetches.
    pub async fn refresh(&self) -> Result<()> {
        self.state.write().await.connection = ConnectionStatus::Connecting;

        let result = self.fetch_all().await;

        {
            let mut state = self.state.write().await;
            match &result {
                Ok(()) => {
                    state.connection = ConnectionStatus::Connected;
                    state.last_sync = Some(OffsetDateTime::now_utc());
                    state.error = None;
                }
                Err(e) => {
                    tracing::warn!("refresh failed: {}", e);
                    state.connection = ConnectionStatus::Disconnected;
                    state.error = Some(e.to_string());
                }
            }
        }

        self.bump();
        result
    }

    async fn fetch_all(&self) -> Result<()> {
        let bins = self.client.get_bins().await.map_err(|e| fetch_error("bins", e))?;
        self.state.write().await.bins = bins;

        let reports = self.client.get_reports().await.map_err(|e| fetch_error("reports", e))?;
        self.state.write().await.reports = reports;

        let trucks = self.client.get_trucks().await.map_err(|e| fetch_error("trucks", e))?;
        self.state.write().await.trucks = trucks;

        let stats = self.client.get_stats().await.map_err(|e| fetch_error("stats", e))?;
        self.state.write().await.stats = stats;

        Ok(())
    }

    /// Polls every `period` until `shutdown` flips to true. The first poll
    /// happens immediately.
    pub async fn run_poll_loop(&self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Failures are recorded in the state by refresh itself
                    let _ = self.refresh().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::debug!("poll loop stopped");
    }

    pub async fn set_role(&self, role: Role) {
        self.state.write().await.role = role;
        self.bump();
    }

    pub async fn select_bin(&self, bin_id: Option<BinId>) {
        self.state.write().await.selected_bin = bin_id;
        self.bump();
    }

    pub async fn show_report_form(&self, visible: bool) {
        self.state.write().await.show_report_form = visible;
        self.bump();
    }

    pub async fn update_report_draft(&self, draft: ReportDraft) {
        self.state.write().await.report_draft = draft;
        self.bump();
    }

    /// Sends the current report draft.
    pub async fn submit_report(&self) -> Notice {
        let draft = self.state.read().await.report_draft.clone();

        if !draft.is_complete() {
            return Notice::Alert(String::from("Please select a bin and provide a description"));
        }

        let request = CreateReportRequest {
            bin_id: draft.bin_id,
            reporter: None,
            issue: draft.issue,
            description: draft.description,
            priority: Some(Priority::Medium),
        };

        match self.client.create_report(&request).await {
            Ok(response) if response.success => {
                let _ = self.refresh().await;

                {
                    let mut state = self.state.write().await;
                    state.report_draft = ReportDraft::default();
                    state.show_report_form = false;
                }
                self.bump();

                Notice::Info(String::from("Report submitted successfully! HYSACAM will respond soon."))
            }
            Ok(_) => Notice::Alert(String::from("Report was not accepted. Please try again.")),
            Err(e) => {
                tracing::error!("error submitting report: {}", e);
                Notice::Alert(String::from(
                    "Error submitting report. Please check your connection and try again.",
                ))
            }
        }
    }

    /// Confirms the pickup of `bin_id` with the first known truck.
    pub async fn collect_bin(&self, bin_id: &str) -> Notice {
        let truck_id = self
            .state
            .read()
            .await
            .trucks
            .first()
            .map(|truck| truck.id.clone())
            .unwrap_or_else(|| String::from(FALLBACK_TRUCK_ID));

        let request = CreateCollectionRequest {
            bin_id: bin_id.to_string(),
            truck_id,
            driver_id: self.driver_id,
        };

        match self.client.create_collection(&request).await {
            Ok(response) if response.success => {
                let _ = self.refresh().await;
                Notice::Info(format!("Bin {} collected successfully!", bin_id))
            }
            Ok(_) => Notice::Alert(String::from("Collection was not logged. Please try again.")),
            Err(e) => {
                tracing::error!("error logging collection: {}", e);
                Notice::Alert(String::from("Error logging collection. Please try again."))
            }
        }
    }

    pub async fn optimize_route(&self) -> Notice {
        match self.client.optimize_route().await {
            Ok(response) if response.success => {
                let _ = self.refresh().await;
                Notice::Info(format!(
                    "Optimized route created with {} bins. Assigning to next available truck...",
                    response.total_bins
                ))
            }
            Ok(_) => Notice::Alert(String::from("Route was not created. Please try again.")),
            Err(e) => {
                tracing::error!("error optimizing route: {}", e);
                Notice::Alert(String::from("Error optimizing route. Please try again."))
            }
        }
    }
}

fn fetch_error(resource: &str, error: Error) -> Error {
    match error {
        Error::Status { code, message } => {
            Error::status(code, format!("Failed to fetch {}: {}", resource, message))
        }
        Error::Network { source, .. } => Error::Network {
            message: format!("Failed to fetch {}", resource),
            source,
        },
        other => other,
    }
}
