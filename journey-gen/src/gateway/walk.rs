//! Walking legs from OpenRouteService.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::error::GatewayError;
use crate::domain::{TransitTime, WalkPoint, WalkTrip};

/// Default OpenRouteService endpoint for foot routing.
const DEFAULT_ORS_URL: &str = "https://api.openrouteservice.org/v2/directions/foot-walking";

/// Configuration for the walking gateway.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// OpenRouteService API key. Walks cannot be fetched without one.
    pub api_key: Option<String>,
    /// Directions endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WalkConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_ORS_URL.to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsDto {
    routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
struct RouteDto {
    summary: SummaryDto,
}

/// Distance in metres and duration in seconds. ORS omits both for a
/// zero-length route.
#[derive(Debug, Deserialize)]
struct SummaryDto {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

fn summary_of(body: &str) -> Result<SummaryDto, GatewayError> {
    let directions: DirectionsDto = serde_json::from_str(body).map_err(|e| GatewayError::Json {
        message: e.to_string(),
    })?;
    directions
        .routes
        .into_iter()
        .next()
        .map(|r| r.summary)
        .ok_or_else(|| GatewayError::invalid("no route between points"))
}

/// Routed seconds as a duration, rejecting values no walk could take.
fn walk_duration(seconds: f64) -> Result<chrono::Duration, GatewayError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(GatewayError::invalid(format!("walk duration {seconds}s")));
    }
    chrono::Duration::try_seconds(seconds.round() as i64)
        .ok_or_else(|| GatewayError::invalid(format!("walk duration {seconds}s out of range")))
}

/// Builds walking legs from routed distance and duration.
#[derive(Debug, Clone)]
pub struct WalkGateway {
    http: reqwest::Client,
    config: WalkConfig,
}

impl WalkGateway {
    pub fn new(config: WalkConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Route from `from` to `to` on foot, leaving at `depart`.
    pub async fn fetch_walk(
        &self,
        from: WalkPoint,
        to: WalkPoint,
        depart: TransitTime,
    ) -> Result<WalkTrip, GatewayError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::NotConfigured("ORS_KEY is not set".to_string()))?;

        let (a, b) = (from.coordinates, to.coordinates);
        let body = json!({
            "coordinates": [[a.longitude, a.latitude], [b.longitude, b.latitude]]
        });
        debug!(from = %from.name, to = %to.name, "walking directions request");

        let response = self
            .http
            .post(&self.config.base_url)
            .header(reqwest::header::AUTHORIZATION, key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GatewayError::Unauthorized);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let summary = summary_of(&response.text().await?)?;
        let duration = walk_duration(summary.duration)?;
        Ok(WalkTrip::new(from, to, depart, summary.distance, duration)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn reads_route_summary() {
        let body = r#"{"routes": [{"summary": {"distance": 1450.3, "duration": 1079.6}, "segments": []}]}"#;
        let summary = summary_of(body).unwrap();
        assert_eq!(summary.distance, 1450.3);
        assert_eq!(summary.duration, 1079.6);

        let zero = summary_of(r#"{"routes": [{"summary": {}}]}"#).unwrap();
        assert_eq!(zero.distance, 0.0);
    }

    #[test]
    fn no_route_is_invalid_data() {
        assert!(matches!(
            summary_of(r#"{"routes": []}"#),
            Err(GatewayError::InvalidData { .. })
        ));
        assert!(matches!(summary_of("<html>"), Err(GatewayError::Json { .. })));
    }

    #[test]
    fn walk_duration_rounds_seconds() {
        assert_eq!(walk_duration(1079.6).unwrap(), chrono::Duration::seconds(1080));
        assert_eq!(walk_duration(0.0).unwrap(), chrono::Duration::zero());
    }

    #[test]
    fn absurd_walk_duration_is_invalid_data() {
        for seconds in [1e300, f64::MAX, f64::INFINITY, f64::NAN, -5.0] {
            assert!(matches!(
                walk_duration(seconds),
                Err(GatewayError::InvalidData { .. })
            ));
        }
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let gateway = WalkGateway::new(WalkConfig::new(None)).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let err = gateway
            .fetch_walk(
                WalkPoint::new("A", 51.0, -2.0),
                WalkPoint::new("B", 51.1, -2.1),
                TransitTime::parse_hhmm("09:00", date).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotConfigured(_)));
    }
}
