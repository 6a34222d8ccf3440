//! What to ask the resolver for, per mode.

use super::cache::CacheKey;
use crate::domain::{Leg, bus_stop_search_term, station_search_term};

/// Everything the resolver needs to find one route's colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourRequest {
    /// Text the route badge starts with: a bus service number or a train
    /// operator's name.
    pub route_label: String,
    pub key: CacheKey,
    /// One map search per stop, in calling order.
    pub search_terms: Vec<String>,
}

/// Build the colour request for a leg. Walks have no route colour.
pub fn colour_request(leg: &Leg) -> Option<ColourRequest> {
    match leg {
        Leg::Bus(trip) => Some(ColourRequest {
            route_label: trip.service().number.clone(),
            key: CacheKey::bus(&trip.service().slug),
            search_terms: trip.stops().iter().map(|s| bus_stop_search_term(&s.stop)).collect(),
        }),
        Leg::Train(service) => {
            let operator = &service.train_operator().name;
            Some(ColourRequest {
                route_label: operator.clone(),
                key: CacheKey::train(operator),
                search_terms: service
                    .calls()
                    .iter()
                    .map(|c| station_search_term(&c.stop))
                    .collect(),
            })
        }
        Leg::Walk(_) => None,
    }
}
