use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{RosterResponse, SubmitEntry, SubmitReply, SubmitRequest, TodayResponse};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::debug;

/// The remote attendance service.
///
/// Implementations decode the JSON body whatever the status code is: the
/// remote reports an empty roster and rejected submissions as JSON error
/// bodies, and those are data for the view, not transport failures.
pub trait AttendanceApi: Send + Sync + 'static {
    fn fetch_roster(&self) -> impl Future<Output = Result<RosterResponse, ApiError>> + Send;

    fn fetch_today(&self) -> impl Future<Output = Result<TodayResponse, ApiError>> + Send;

    fn submit(
        &self,
        batch: Vec<SubmitEntry>,
    ) -> impl Future<Output = Result<SubmitReply, ApiError>> + Send;

    /// File names of generated reports, newest first.
    fn list_reports(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpAttendanceApi {
    client: Client,
    base: Url,
}

impl HttpAttendanceApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base: config.api_base.clone(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Url {
        self.base.join(path).unwrap_or_else(|_| self.base.clone())
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(endpoint, %status, len = bytes.len(), "remote response");
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { endpoint, source })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, ApiError> {
        let response = self.client.get(self.endpoint(endpoint)).send().await?;
        Self::decode(endpoint, response).await
    }
}

impl AttendanceApi for HttpAttendanceApi {
    async fn fetch_roster(&self) -> Result<RosterResponse, ApiError> {
        self.get("employees").await
    }

    async fn fetch_today(&self) -> Result<TodayResponse, ApiError> {
        self.get("today").await
    }

    async fn submit(&self, batch: Vec<SubmitEntry>) -> Result<SubmitReply, ApiError> {
        let body = SubmitRequest { attendance: batch };
        let response = self
            .client
            .post(self.endpoint("submit_attendance"))
            .json(&body)
            .send()
            .await?;
        Self::decode("submit_attendance", response).await
    }

    async fn list_reports(&self) -> Result<Vec<String>, ApiError> {
        self.get("reports/list").await
    }
}
