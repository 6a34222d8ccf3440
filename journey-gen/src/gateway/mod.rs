//! Mode gateways: where trips come from.
//!
//! Bus and train trips are served as JSON by the journey query API; walks
//! are routed by OpenRouteService. Every gateway hands back a validated
//! domain trip.

mod bus;
mod cache;
mod client;
mod error;
mod train;
mod walk;

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::Leg;

pub use bus::{BusGateway, BusTripDto, convert_trip};
pub use cache::{CachedGateway, TripCacheConfig};
pub use client::{ApiClient, ApiConfig};
pub use error::GatewayError;
pub use train::{ServiceDto, TrainGateway, convert_service};
pub use walk::{WalkConfig, WalkGateway};

/// Fetches one day's run of a trip by its mode-specific identifier.
pub trait TripGateway {
    /// # Errors
    ///
    /// `GatewayError::NotFound` when the identifier has no trip on `date`.
    fn fetch_trip(
        &self,
        id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Leg, GatewayError>> + Send;
}
