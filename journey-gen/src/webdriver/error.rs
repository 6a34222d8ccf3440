//! WebDriver client error types.

use std::fmt;
use std::time::Duration;

use crate::colour::LookupFault;

/// Errors from the WebDriver client.
#[derive(Debug)]
pub enum WebDriverError {
    /// HTTP request to the WebDriver server failed
    Http(reqwest::Error),

    /// The server answered with a W3C error object
    Protocol { error: String, message: String },

    /// Response body was not the JSON we expected
    Json { message: String },

    /// A page element did not appear in time
    Timeout { selector: String, waited: Duration },

    /// A URL could not be built from the search term
    InvalidUrl(String),
}

impl WebDriverError {
    /// W3C error codes after which the session cannot be used again.
    fn is_session_loss(&self) -> bool {
        matches!(
            self,
            WebDriverError::Protocol { error, .. }
                if error == "invalid session id" || error == "session not created"
        )
    }
}

impl fmt::Display for WebDriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebDriverError::Http(e) => write!(f, "HTTP error: {e}"),
            WebDriverError::Protocol { error, message } => {
                write!(f, "webdriver error {error}: {message}")
            }
            WebDriverError::Json { message } => write!(f, "JSON parse error: {message}"),
            WebDriverError::Timeout { selector, waited } => {
                write!(f, "timed out after {waited:?} waiting for {selector}")
            }
            WebDriverError::InvalidUrl(msg) => write!(f, "invalid URL: {msg}"),
        }
    }
}

impl std::error::Error for WebDriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WebDriverError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WebDriverError {
    fn from(err: reqwest::Error) -> Self {
        WebDriverError::Http(err)
    }
}

impl From<WebDriverError> for LookupFault {
    fn from(err: WebDriverError) -> Self {
        match &err {
            WebDriverError::Timeout { waited, .. } => LookupFault::Timeout(*waited),
            WebDriverError::Http(e) if e.is_connect() => LookupFault::Navigation(err.to_string()),
            _ if err.is_session_loss() => LookupFault::Navigation(err.to_string()),
            _ => LookupFault::Transient(err.to_string()),
        }
    }
}
