//! Route colour resolution.
//!
//! Colours are looked up once per route and kept in a flat-file cache.
//! A miss drives a live lookup over the trip's stops and, failing that,
//! asks an operator.

mod cache;
mod error;
mod lookup;
mod prompt;
mod request;
mod resolver;
mod style;

pub use cache::{CacheKey, ColourCache, Namespace};
pub use error::ColourError;
pub use lookup::{LiveLookup, LookupFault};
pub use prompt::{ConsolePrompt, ManualInput};
pub use request::{ColourRequest, colour_request};
pub use resolver::{ColourResolver, ColourSource, Resolution, ResolverConfig, colours_from_style};
pub use style::{StyleMap, parse_css_colour, parse_style, style_colour};
