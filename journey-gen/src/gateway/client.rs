//! HTTP client for the journey query API.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::GatewayError;

/// Configuration for the query API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the query API, e.g. "http://localhost:8000"
    pub api_host: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(api_host: impl Into<String>) -> Self {
        Self {
            api_host: api_host.into(),
            timeout_secs: 30,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// `{kind}/{id}/{yyyy}/{m}/{d}`: the API's path for one day's trip.
pub(crate) fn dated_path(kind: &str, id: &str, date: NaiveDate) -> String {
    format!("{kind}/{id}/{}/{}/{}", date.year(), date.month(), date.day())
}

/// Client for the query API that serves trips as JSON.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_host: String,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_host: config.api_host.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{api_host}/{path}` and decode the JSON body.
    ///
    /// A 404 or an empty/`null` body is `NotFound`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = format!("{}/{path}", self.api_host);
        debug!(url, "query API request");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound {
                identifier: path.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        decode_body(path, &body)
    }
}

pub(crate) fn decode_body<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, GatewayError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(GatewayError::NotFound {
            identifier: path.to_string(),
        });
    }

    serde_json::from_str(trimmed).map_err(|e| GatewayError::Json {
        message: e.to_string(),
    })
}
