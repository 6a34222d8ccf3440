//! Journey page generator.
//!
//! Reads a plan of bus, train and walking legs, fetches each trip, cuts it
//! down to the stops actually travelled, works out the colours each route
//! is drawn in, and writes the result as a static HTML page.

pub mod colour;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod plan;
pub mod render;
pub mod urls;
pub mod webdriver;
