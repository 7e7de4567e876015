//! HTTP client for the read-only metrics API.
//!
//! Two endpoints, fetched in parallel. Bodies are read as loose JSON and
//! run through the normalizer, so string-encoded numbers are fine.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use tally_core::normalize::{normalize_departments, normalize_time_series};
use tally_core::{DepartmentMetric, TimeSeriesPoint};

pub const DEFAULT_HOST: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEPARTMENTS_PATH: &str = "/api/v1/metrics/departments";
pub const TIMESERIES_PATH: &str = "/api/v1/metrics/timeseries";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not decode {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Both datasets as the dashboard consumes them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsData {
    pub departments: Vec<DepartmentMetric>,
    pub time_series: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone)]
pub struct MetricsClient {
    http: reqwest::Client,
    host: String,
}

impl MetricsClient {
    pub fn new(host: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            host: host.trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    async fn get_array(&self, path: &str) -> Result<Vec<Value>, FetchError> {
        let url = self.url(path);
        tracing::debug!(%url, "fetching");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body: Value = resp.json().await.map_err(|e| FetchError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        match body {
            Value::Array(items) => Ok(items),
            _ => Err(FetchError::Decode {
                url,
                reason: "expected a JSON array".to_string(),
            }),
        }
    }

    pub async fn fetch_departments(&self) -> Result<Vec<DepartmentMetric>, FetchError> {
        let raw = self.get_array(DEPARTMENTS_PATH).await?;
        Ok(normalize_departments(&raw))
    }

    pub async fn fetch_time_series(&self) -> Result<Vec<TimeSeriesPoint>, FetchError> {
        let raw = self.get_array(TIMESERIES_PATH).await?;
        Ok(normalize_time_series(&raw))
    }

    /// Fetch both endpoints concurrently. Fails as a whole if either fails.
    pub async fn fetch_all(&self) -> Result<MetricsData, FetchError> {
        let (departments, time_series) =
            tokio::try_join!(self.fetch_departments(), self.fetch_time_series())?;
        tracing::debug!(
            departments = departments.len(),
            points = time_series.len(),
            "metrics fetched"
        );
        Ok(MetricsData {
            departments,
            time_series,
        })
    }

    /// [`fetch_all`](Self::fetch_all), logging any failure and falling back
    /// to empty datasets.
    pub async fn fetch_or_empty(&self) -> MetricsData {
        match self.fetch_all().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "error fetching metrics");
                MetricsData::default()
            }
        }
    }
}
