//! In-process trip cache.
//!
//! A plan often rides the same trip twice (out and back on one bus, or a
//! change that stays on the same train), so fetched trips are kept per
//! (identifier, date) for the life of the process.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use tracing::debug;

use super::TripGateway;
use super::error::GatewayError;
use crate::domain::Leg;

/// Cache key for trips: (identifier, run date).
type TripKey = (String, NaiveDate);

/// Configuration for the trip cache.
#[derive(Debug, Clone)]
pub struct TripCacheConfig {
    /// TTL for cached trips.
    pub ttl: Duration,

    /// Maximum number of cached trips.
    pub max_capacity: u64,
}

impl Default for TripCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 256,
        }
    }
}

/// A gateway wrapped with a trip cache.
pub struct CachedGateway<G> {
    inner: G,
    trips: MokaCache<TripKey, Arc<Leg>>,
}

impl<G: TripGateway> CachedGateway<G> {
    pub fn new(inner: G, config: &TripCacheConfig) -> Self {
        let trips = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, trips }
    }

    /// Fetch a trip, using the cache if available.
    ///
    /// Failures are not cached.
    pub async fn fetch(&self, id: &str, date: NaiveDate) -> Result<Arc<Leg>, GatewayError> {
        let key = (id.to_string(), date);

        if let Some(cached) = self.trips.get(&key).await {
            debug!(id, %date, "trip cache hit");
            return Ok(cached);
        }

        let leg = Arc::new(self.inner.fetch_trip(id, date).await?);
        self.trips.insert(key, leg.clone()).await;
        Ok(leg)
    }

    /// Access the underlying gateway.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::bus;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl TripGateway for Counting {
        fn fetch_trip(
            &self,
            id: &str,
            _date: NaiveDate,
        ) -> impl Future<Output = Result<Leg, GatewayError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = if id == "missing" {
                Err(GatewayError::NotFound {
                    identifier: id.to_string(),
                })
            } else {
                Ok(Leg::Bus(bus::fixtures::trip()))
            };
            async move { result }
        }
    }

    #[tokio::test]
    async fn second_fetch_is_cached() {
        let gateway = CachedGateway::new(Counting::default(), &TripCacheConfig::default());
        let date = bus::fixtures::date();

        let first = gateway.fetch("4242", date).await.unwrap();
        let second = gateway.fetch("4242", date).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(gateway.inner().calls.load(Ordering::SeqCst), 1);

        gateway.fetch("4242", date.succ_opt().unwrap()).await.unwrap();
        assert_eq!(gateway.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let gateway = CachedGateway::new(Counting::default(), &TripCacheConfig::default());
        let date = bus::fixtures::date();

        assert!(gateway.fetch("missing", date).await.unwrap_err().is_not_found());
        assert!(gateway.fetch("missing", date).await.is_err());
        assert_eq!(gateway.inner().calls.load(Ordering::SeqCst), 2);
    }
}
