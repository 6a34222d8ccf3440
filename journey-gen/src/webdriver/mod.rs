//! Browser automation over the W3C WebDriver protocol.
//!
//! Used only for the live route colour lookup.

mod error;
mod maps;
mod session;

pub use error::WebDriverError;
pub use maps::{MapsConfig, MapsRouteLookup};
pub use session::{ElementId, Locator, WebDriverConfig, WebDriverSession};
