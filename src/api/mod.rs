//! HTTP client for the IoT controller.
//!
//! The controller exposes three endpoints:
//!
//! - `GET /graph?size=N` returns the most recent `N` samples, oldest first
//! - `PUT /settings` accepts new settings and echoes the resulting state
//! - `GET /settings` returns the current state

mod models;

pub use models::{format_time_of_day, DeviceSettings, Sample, SettingValue, Settings, INVALID_DATE};

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::{DashError, Result};

/// Thin typed wrapper over the controller's REST API.
#[derive(Debug, Clone)]
pub struct ControllerClient {
    http: Client,
    base: String,
}

impl ControllerClient {
    /// Create a client for the controller at `base`.
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let base = normalize_base_url(base)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Fetch the most recent `size` samples.
    pub async fn fetch_graph(&self, size: usize) -> Result<Vec<Sample>> {
        let url = format!("{}/graph?size={}", self.base, size);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        decode(&url, response).await
    }

    /// Push settings; returns the controller's JSON reply untouched.
    pub async fn put_settings(&self, settings: &Settings) -> Result<serde_json::Value> {
        let url = format!("{}/settings", self.base);
        tracing::debug!("PUT {} {:?}", url, settings);

        // `.json()` sets `Content-Type: application/json`
        let response = self.http.put(&url).json(settings).send().await?;
        decode(&url, response).await
    }

    /// Read the controller's current settings.
    pub async fn device_settings(&self) -> Result<DeviceSettings> {
        let url = format!("{}/settings", self.base);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        decode(&url, response).await
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let text = String::from_utf8_lossy(&body).into_owned();
        return Err(DashError::status(status.as_u16(), url, text));
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Validate a base URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| DashError::invalid_url(trimmed, e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {},
        other => {
            return Err(DashError::invalid_url(
                trimmed,
                format!("unsupported scheme '{}'", other),
            ))
        },
    }
    if url.host_str().is_none() {
        return Err(DashError::invalid_url(trimmed, "missing host"));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
