use cloudwaste_api::models::*;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Thin HTTP wrapper with one method per API endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::configuration(format!("invalid API url {}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(Error::configuration(format!("API url {} cannot be a base", base_url)));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get_bins(&self) -> Result<Vec<Bin>> {
        self.get(&["api", "bins"]).await
    }

    pub async fn get_bin(&self, bin_id: &str) -> Result<Bin> {
        self.get(&["api", "bins", bin_id]).await
    }

    pub async fn get_bins_by_neighborhood(&self, neighborhood: &str) -> Result<Vec<Bin>> {
        self.get(&["api", "bins", "neighborhood", neighborhood]).await
    }

    pub async fn send_sensor_data(
        &self,
        bin_id: &str,
        body: &SensorDataRequest,
    ) -> Result<SensorDataResponse> {
        self.post(&["api", "bins", bin_id, "sensor-data"], body).await
    }

    pub async fn get_sensor_data(&self, bin_id: &str, limit: Option<i64>) -> Result<Vec<SensorReading>> {
        let mut url = self.url(&["api", "bins", bin_id, "sensor-data"]);
        if let Some(limit) = limit {
            url.query_pairs_mut().append_pair("limit", &limit.to_string());
        }

        Self::parse(self.http.get(url).send().await?).await
    }

    pub async fn get_reports(&self) -> Result<Vec<ReportDetail>> {
        self.get(&["api", "reports"]).await
    }

    pub async fn create_report(&self, body: &CreateReportRequest) -> Result<CreateReportResponse> {
        self.post(&["api", "reports"], body).await
    }

    pub async fn update_report_status(&self, report_id: Id, status: ReportStatus) -> Result<MessageResponse> {
        let url = self.url(&["api", "reports", &report_id.to_string()]);
        let response = self
            .http
            .patch(url)
            .json(&UpdateReportRequest { status })
            .send()
            .await?;

        Self::parse(response).await
    }

    pub async fn get_trucks(&self) -> Result<Vec<Truck>> {
        self.get(&["api", "trucks"]).await
    }

    pub async fn update_truck_location(
        &self,
        truck_id: &str,
        body: &TruckLocationRequest,
    ) -> Result<SuccessResponse> {
        self.post(&["api", "trucks", truck_id, "location"], body).await
    }

    pub async fn create_collection(&self, body: &CreateCollectionRequest) -> Result<MessageResponse> {
        self.post(&["api", "collections"], body).await
    }

    pub async fn get_collection_history(&self, days: Option<i64>) -> Result<Vec<HistoryEntry>> {
        let mut url = self.url(&["api", "collections", "history"]);
        if let Some(days) = days {
            url.query_pairs_mut().append_pair("days", &days.to_string());
        }

        Self::parse(self.http.get(url).send().await?).await
    }

    pub async fn get_stats(&self) -> Result<Stats> {
        self.get(&["api", "stats"]).await
    }

    pub async fn optimize_route(&self) -> Result<RouteResponse> {
        let response = self.http.post(self.url(&["api", "optimize-route"])).send().await?;

        Self::parse(response).await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get(&["api", "health"]).await
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.http.get(self.url(segments)).send().await?;

        Self::parse(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> Result<T> {
        let response = self.http.post(self.url(segments)).json(body).send().await?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&bytes)
                .map(|body| body.error)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string());

            return Err(Error::status(status.as_u16(), message));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_escapes_segments() {
        let client = ApiClient::new("http://localhost:3000").unwrap();

        assert_eq!(
            client.url(&["api", "bins", "neighborhood", "Mvog Ada"]).as_str(),
            "http://localhost:3000/api/bins/neighborhood/Mvog%20Ada"
        );
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = ApiClient::new("http://example.com/cloudwaste/").unwrap();

        assert_eq!(
            client.url(&["api", "stats"]).as_str(),
            "http://example.com/cloudwaste/api/stats"
        );
    }

    #[test]
    fn test_rejects_unusable_url() {
        assert!(matches!(ApiClient::new("not a url"), Err(Error::Configuration { .. })));
        assert!(matches!(ApiClient::new("mailto:ops@example.com"), Err(Error::Configuration { .. })));
    }
}
