//! Route colour lookup on a map search page.
//!
//! Searching a map site for a stop shows badges for the routes serving
//! it, drawn in each route's colours. This reads the inline style of the
//! badge whose text starts with the route label.

use std::future::Future;

use tracing::{debug, info};

use super::error::WebDriverError;
use super::session::{Locator, WebDriverConfig, WebDriverSession};
use crate::colour::{LiveLookup, LookupFault, StyleMap, parse_style};

/// Page details the lookup depends on.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// Search page; the term is appended as the `q` parameter
    pub search_url: String,
    /// Present once results (or the cookie wall) have loaded
    pub ready_selector: String,
    /// Present once results have loaded
    pub results_selector: String,
    /// Route badge elements
    pub badge_selector: String,
    /// Text of the button that dismisses the cookie wall
    pub reject_cookies_text: String,
}

impl MapsConfig {
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.google.co.uk/maps/".to_string(),
            ready_selector: ".cb7kab, .cukLmd".to_string(),
            results_selector: ".cukLmd".to_string(),
            badge_selector: ".Bzv5Cd".to_string(),
            reject_cookies_text: "Reject all".to_string(),
        }
    }
}

/// Build the search URL for a term.
fn search_url(base: &str, term: &str) -> Result<String, WebDriverError> {
    reqwest::Url::parse_with_params(base, &[("q", term)])
        .map(String::from)
        .map_err(|e| WebDriverError::InvalidUrl(e.to_string()))
}

/// XPath for an element whose whole text is `text`.
fn exact_text_xpath(text: &str) -> String {
    format!("//*[text()='{text}']")
}

/// `LiveLookup` backed by a browser session.
pub struct MapsRouteLookup {
    session: WebDriverSession,
    config: MapsConfig,
}

impl MapsRouteLookup {
    pub fn new(session: WebDriverSession, config: MapsConfig) -> Self {
        Self { session, config }
    }

    /// Start a browser session and wrap it.
    pub async fn connect(
        webdriver: &WebDriverConfig,
        config: MapsConfig,
    ) -> Result<Self, WebDriverError> {
        let session = WebDriverSession::start(webdriver).await?;
        Ok(Self::new(session, config))
    }

    pub async fn close(self) -> Result<(), WebDriverError> {
        self.session.close().await
    }

    async fn dismiss_cookies(&self) -> Result<(), WebDriverError> {
        let xpath = exact_text_xpath(&self.config.reject_cookies_text);
        if let Some(button) = self
            .session
            .find_elements(Locator::XPath, &xpath)
            .await?
            .into_iter()
            .next()
        {
            info!("dismissing cookie wall");
            self.session.click(&button).await?;
            self.session.wait_for(&self.config.results_selector).await?;
        }
        Ok(())
    }

    async fn search(
        &self,
        term: &str,
        route_label: &str,
    ) -> Result<Option<StyleMap>, WebDriverError> {
        let url = search_url(&self.config.search_url, term)?;
        self.session.navigate(&url).await?;

        let ready = self.session.wait_for(&self.config.ready_selector).await?;
        if self.session.element_text(&ready).await?.contains("cookies") {
            self.dismiss_cookies().await?;
        }

        let badges = self
            .session
            .find_elements(Locator::Css, &self.config.badge_selector)
            .await?;
        debug!(term, badges = badges.len(), "route badges found");

        for badge in &badges {
            let text = self.session.element_text(badge).await?;
            if text.starts_with(route_label) {
                let style = self.session.element_attribute(badge, "style").await?;
                return Ok(Some(parse_style(style.as_deref().unwrap_or_default())));
            }
        }
        Ok(None)
    }
}

impl LiveLookup for MapsRouteLookup {
    fn lookup(
        &mut self,
        term: &str,
        route_label: &str,
    ) -> impl Future<Output = Result<Option<StyleMap>, LookupFault>> + Send {
        async move { self.search(term, route_label).await.map_err(LookupFault::from) }
    }
}
