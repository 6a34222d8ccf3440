//! Minimal W3C WebDriver client.
//!
//! Only the handful of commands the route lookup needs: start a session,
//! navigate, find elements, read text and attributes, click, and close.

use std::time::Duration;

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::time::Instant;
use tracing::{debug, trace};

use super::error::WebDriverError;

/// Key W3C uses for element references in JSON.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Default WebDriver server (geckodriver/chromedriver/selenium standalone).
const DEFAULT_BASE_URL: &str = "http://localhost:4444";

/// Configuration for a WebDriver session.
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    /// WebDriver server URL
    pub base_url: String,
    /// `browserName` capability
    pub browser: String,
    /// Per-command HTTP timeout in seconds
    pub timeout_secs: u64,
    /// How long to wait for page elements to appear
    pub wait_timeout: Duration,
    /// Delay between element polls while waiting
    pub poll_interval: Duration,
}

impl WebDriverConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = browser.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_wait_timeout(mut self, wait: Duration) -> Self {
        self.wait_timeout = wait;
        self
    }

    pub fn with_poll_interval(mut self, poll: Duration) -> Self {
        self.poll_interval = poll;
        self
    }
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            browser: "firefox".to_string(),
            timeout_secs: 30,
            wait_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// How to locate elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    Css,
    XPath,
}

impl Locator {
    fn strategy(&self) -> &'static str {
        match self {
            Locator::Css => "css selector",
            Locator::XPath => "xpath",
        }
    }
}

/// Opaque reference to an element on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    value: T,
}

#[derive(Deserialize)]
struct ErrorValue {
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct NewSession {
    #[serde(rename = "sessionId")]
    session_id: String,
}

/// Decode a WebDriver response body: `{"value": ...}` on success, or
/// `{"value": {"error": ..., "message": ...}}` on failure.
fn decode<T: DeserializeOwned>(status: reqwest::StatusCode, body: &str) -> Result<T, WebDriverError> {
    if !status.is_success() {
        return Err(match serde_json::from_str::<Envelope<ErrorValue>>(body) {
            Ok(Envelope { value }) => WebDriverError::Protocol {
                error: value.error,
                message: value.message,
            },
            Err(_) => WebDriverError::Protocol {
                error: format!("http {}", status.as_u16()),
                message: body.chars().take(200).collect(),
            },
        });
    }

    serde_json::from_str::<Envelope<T>>(body)
        .map(|e| e.value)
        .map_err(|e| WebDriverError::Json {
            message: e.to_string(),
        })
}

fn element_ids(values: Vec<Value>) -> Result<Vec<ElementId>, WebDriverError> {
    values
        .into_iter()
        .map(|v| {
            v.get(ELEMENT_KEY)
                .and_then(Value::as_str)
                .map(|id| ElementId(id.to_string()))
                .ok_or_else(|| WebDriverError::Json {
                    message: format!("element reference without {ELEMENT_KEY}"),
                })
        })
        .collect()
}

async fn send<T: DeserializeOwned>(
    http: &reqwest::Client,
    method: Method,
    url: &str,
    body: Option<Value>,
) -> Result<T, WebDriverError> {
    trace!(%method, url, "webdriver command");
    let mut request = http.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    decode(status, &text)
}

/// A live browser session.
#[derive(Debug)]
pub struct WebDriverSession {
    http: reqwest::Client,
    session_url: String,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl WebDriverSession {
    /// Ask the server for a new browser session.
    pub async fn start(config: &WebDriverConfig) -> Result<Self, WebDriverError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base = config.base_url.trim_end_matches('/');
        let capabilities = json!({
            "capabilities": { "alwaysMatch": { "browserName": config.browser } }
        });
        let created: NewSession =
            send(&http, Method::POST, &format!("{base}/session"), Some(capabilities)).await?;
        debug!(session = %created.session_id, "webdriver session started");

        Ok(Self {
            http,
            session_url: format!("{base}/session/{}", created.session_id),
            wait_timeout: config.wait_timeout,
            poll_interval: config.poll_interval,
        })
    }

    async fn command<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, WebDriverError> {
        let url = format!("{}{path}", self.session_url);
        send(&self.http, method, &url, body).await
    }

    pub async fn navigate(&self, url: &str) -> Result<(), WebDriverError> {
        let _: Value = self
            .command(Method::POST, "/url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    pub async fn find_elements(
        &self,
        locator: Locator,
        value: &str,
    ) -> Result<Vec<ElementId>, WebDriverError> {
        let body = json!({ "using": locator.strategy(), "value": value });
        let found: Vec<Value> = self.command(Method::POST, "/elements", Some(body)).await?;
        element_ids(found)
    }

    pub async fn element_text(&self, element: &ElementId) -> Result<String, WebDriverError> {
        self.command(Method::GET, &format!("/element/{}/text", element.0), None)
            .await
    }

    pub async fn element_attribute(
        &self,
        element: &ElementId,
        name: &str,
    ) -> Result<Option<String>, WebDriverError> {
        self.command(
            Method::GET,
            &format!("/element/{}/attribute/{name}", element.0),
            None,
        )
        .await
    }

    pub async fn click(&self, element: &ElementId) -> Result<(), WebDriverError> {
        let _: Value = self
            .command(
                Method::POST,
                &format!("/element/{}/click", element.0),
                Some(json!({})),
            )
            .await?;
        Ok(())
    }

    /// Poll until an element matching `css` exists, returning the first.
    pub async fn wait_for(&self, css: &str) -> Result<ElementId, WebDriverError> {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            if let Some(first) = self.find_elements(Locator::Css, css).await?.into_iter().next() {
                return Ok(first);
            }
            if Instant::now() >= deadline {
                return Err(WebDriverError::Timeout {
                    selector: css.to_string(),
                    waited: self.wait_timeout,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// End the session and close the browser.
    pub async fn close(self) -> Result<(), WebDriverError> {
        let _: Value = send(&self.http, Method::DELETE, &self.session_url, None).await?;
        debug!("webdriver session closed");
        Ok(())
    }
}
