//! Process configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::colour::ResolverConfig;
use crate::domain::{Colour, ColourPair};
use crate::gateway::{ApiConfig, TripCacheConfig, WalkConfig};
use crate::webdriver::WebDriverConfig;

/// Errors reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be a #rrggbb colour, got {value:?}")]
    InvalidColour { name: &'static str, value: String },
}

/// Everything the generator needs to reach its collaborators.
///
/// | Variable              | Default                    |
/// |-----------------------|----------------------------|
/// | `JOURNEY_DATA_DIR`    | `data`                     |
/// | `JOURNEY_COLOUR_DIR`  | `{JOURNEY_DATA_DIR}/colours` |
/// | `API_HOST`            | `http://localhost:8000`    |
/// | `WEBDRIVER_URL`       | `http://localhost:4444`    |
/// | `WEBDRIVER_BROWSER`   | `firefox`                  |
/// | `ORS_KEY`             | unset (walks unavailable)  |
/// | `HTTP_TIMEOUT_SECS`   | `30`                       |
/// | `LOOKUP_TIMEOUT_SECS` | `30`                       |
/// | `TRIP_CACHE_CAPACITY` | `256`                      |
/// | `WALK_BG` / `WALK_FG` | `#ffffff` / `#000000`      |
#[derive(Debug, Clone)]
pub struct JourneyConfig {
    pub data_dir: PathBuf,
    pub colour_cache_dir: PathBuf,
    pub api_host: String,
    pub webdriver_url: String,
    pub browser: String,
    pub ors_key: Option<String>,
    pub http_timeout_secs: u64,
    pub lookup_timeout: Duration,
    pub trip_cache_capacity: u64,
    /// Colours walks are drawn in; walks are never looked up.
    pub walk_colours: ColourPair,
}

impl JourneyConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let number = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
            match var(name) {
                None => Ok(default),
                Some(value) => value
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { name, value }),
            }
        };

        let colour = |name: &'static str, default: Colour| -> Result<Colour, ConfigError> {
            match var(name) {
                None => Ok(default),
                Some(value) => {
                    Colour::parse_hex(&value).map_err(|_| ConfigError::InvalidColour { name, value })
                }
            }
        };

        let data_dir = PathBuf::from(var("JOURNEY_DATA_DIR").unwrap_or_else(|| "data".to_string()));
        let colour_cache_dir = var("JOURNEY_COLOUR_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("colours"));

        Ok(Self {
            colour_cache_dir,
            data_dir,
            api_host: var("API_HOST").unwrap_or_else(|| "http://localhost:8000".to_string()),
            webdriver_url: var("WEBDRIVER_URL").unwrap_or_else(|| "http://localhost:4444".to_string()),
            browser: var("WEBDRIVER_BROWSER").unwrap_or_else(|| "firefox".to_string()),
            ors_key: var("ORS_KEY"),
            http_timeout_secs: number("HTTP_TIMEOUT_SECS", 30)?,
            lookup_timeout: Duration::from_secs(number("LOOKUP_TIMEOUT_SECS", 30)?),
            trip_cache_capacity: number("TRIP_CACHE_CAPACITY", 256)?,
            walk_colours: ColourPair::new(
                colour("WALK_BG", Colour::WHITE)?,
                colour("WALK_FG", Colour::BLACK)?,
            ),
        })
    }

    pub fn api(&self) -> ApiConfig {
        ApiConfig::new(&self.api_host).with_timeout(self.http_timeout_secs)
    }

    pub fn walk(&self) -> WalkConfig {
        WalkConfig::new(self.ors_key.clone()).with_timeout(self.http_timeout_secs)
    }

    pub fn webdriver(&self) -> WebDriverConfig {
        WebDriverConfig::new(&self.webdriver_url)
            .with_browser(&self.browser)
            .with_timeout(self.http_timeout_secs)
            .with_wait_timeout(self.lookup_timeout)
    }

    pub fn resolver(&self) -> ResolverConfig {
        ResolverConfig::new().with_lookup_timeout(self.lookup_timeout)
    }

    pub fn trip_cache(&self) -> TripCacheConfig {
        TripCacheConfig {
            max_capacity: self.trip_cache_capacity,
            ..TripCacheConfig::default()
        }
    }
}
