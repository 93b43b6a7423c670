// crates/client/src/client.rs
//! Typed HTTP client for the `/api/stats/*` endpoints.

use std::time::Duration;

use outreach_stats_core::{DailyStats, Project, StatsFilters, StatsResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the API base URL (including `/api`).
pub const API_URL_ENV: &str = "OUTREACH_STATS_API_URL";

const DEFAULT_API_URL: &str = "http://127.0.0.1:47893/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Base URL from `OUTREACH_STATS_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }
}

/// `{"success": bool, "data"?: T, "error"?: string}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatsClient {
    http: Client,
    base_url: String,
}

impl StatsClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /stats/response-rates
    pub async fn fetch_stats(
        &self,
        filters: &StatsFilters,
        include_comparison: bool,
    ) -> ClientResult<StatsResponse> {
        let mut query = filter_query(filters)?;
        query.push(("include_comparison", include_comparison.to_string()));
        self.get("/stats/response-rates", &query, "Failed to fetch statistics")
            .await
    }

    /// GET /stats/daily-stats
    pub async fn fetch_daily_stats(&self, filters: &StatsFilters) -> ClientResult<Vec<DailyStats>> {
        let query = filter_query(filters)?;
        self.get("/stats/daily-stats", &query, "Failed to fetch daily statistics")
            .await
    }

    /// GET /stats/projects
    pub async fn fetch_projects(&self, user_id: &str) -> ClientResult<Vec<Project>> {
        if user_id.is_empty() {
            return Err(ClientError::IncompleteFilters);
        }
        let query = [("user_id", user_id.to_string())];
        self.get("/stats/projects", &query, "Failed to fetch projects")
            .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        fallback_error: &str,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Fetching stats");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let envelope = serde_json::from_str::<Envelope<T>>(&body);

        if !status.is_success() {
            let message = envelope
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = envelope
            .map_err(|e| ClientError::Api(format!("{fallback_error}: invalid response ({e})")))?;
        match envelope {
            Envelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            Envelope { error, .. } => Err(ClientError::Api(
                error.unwrap_or_else(|| fallback_error.to_string()),
            )),
        }
    }
}

/// Query pairs for a period request; project only when selected.
fn filter_query(filters: &StatsFilters) -> ClientResult<Vec<(&'static str, String)>> {
    if filters.user_id.is_empty() {
        return Err(ClientError::IncompleteFilters);
    }
    let mut query = vec![
        ("user_id", filters.user_id.clone()),
        ("start_date", filters.start_date.format("%Y-%m-%d").to_string()),
        ("end_date", filters.end_date.format("%Y-%m-%d").to_string()),
    ];
    if let Some(project_id) = filters.project_id.as_deref().filter(|p| !p.is_empty()) {
        query.push(("project_id", project_id.to_string()));
    }
    Ok(query)
}
