//! Railway stations and train services.
//!
//! A `TrainService` is one run of a timetabled train on a given day. Calls
//! are stored in calling order and matched by CRS code, so a service that
//! calls at the same station twice (a loop or reversal) yields the first
//! call when boarding there.

use std::borrow::Cow;

use super::model::{SCHEME_CRS, validate_calls};
use super::{
    ColourPair, Coordinates, Crs, DomainError, Identifiers, Stop, TransitTime, Trip, TripStop,
};
use crate::urls;

/// A train operating company.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOperator {
    pub name: String,
    /// Two-letter ATOC code, e.g. "GW".
    pub atoc: String,
    /// Brand colours, when the query API has them on record.
    pub colours: Option<ColourPair>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainStation {
    pub name: String,
    pub crs: Crs,
    pub coordinates: Option<Coordinates>,
}

/// A station together with the platform a particular call uses.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainStop {
    pub station: TrainStation,
    pub platform: Option<String>,
}

impl Stop for TrainStop {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.station.name)
    }

    fn coordinates(&self) -> Option<Coordinates> {
        self.station.coordinates
    }

    fn location_label(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    fn identifiers(&self) -> Identifiers {
        Identifiers::from([(SCHEME_CRS, self.station.crs.to_string())])
    }

    fn url(&self) -> String {
        urls::train_station_url(&self.station.crs, None)
    }
}

/// A station call on a train service, with booked times.
///
/// Origins carry only a departure and destinations only an arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainCall {
    pub stop: TrainStop,
    pub arrival: Option<TransitTime>,
    pub departure: Option<TransitTime>,
}

impl TripStop for TrainCall {
    fn stop(&self) -> &dyn Stop {
        &self.stop
    }

    fn identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.stop.station.crs.as_str())
    }

    fn arrival(&self) -> Option<TransitTime> {
        self.arrival
    }

    fn departure(&self) -> Option<TransitTime> {
        self.departure
    }

    fn url(&self) -> String {
        urls::train_station_url(&self.stop.station.crs, self.departure.or(self.arrival))
    }
}

/// One day's run of a train service.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainService {
    uid: String,
    headcode: String,
    run_datetime: TransitTime,
    origins: Vec<TrainStation>,
    destinations: Vec<TrainStation>,
    calls: Vec<TrainCall>,
    operator: TrainOperator,
}

impl TrainService {
    /// Build a service, validating the calling pattern.
    pub fn new(
        uid: impl Into<String>,
        headcode: impl Into<String>,
        run_datetime: TransitTime,
        origins: Vec<TrainStation>,
        destinations: Vec<TrainStation>,
        calls: Vec<TrainCall>,
        operator: TrainOperator,
    ) -> Result<Self, DomainError> {
        validate_calls(&calls)?;
        Ok(Self {
            uid: uid.into(),
            headcode: headcode.into(),
            run_datetime,
            origins,
            destinations,
            calls,
            operator,
        })
    }

    /// Stable schedule UID, as used by RealTimeTrains.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn train_operator(&self) -> &TrainOperator {
        &self.operator
    }

    pub fn calls(&self) -> &[TrainCall] {
        &self.calls
    }
}

impl Trip for TrainService {
    fn identifier(&self) -> &str {
        &self.headcode
    }

    /// e.g. "1000 London Paddington to Bristol Temple Meads"
    fn name(&self) -> String {
        format!(
            "{} {} to {}",
            self.run_datetime.short_string(),
            self.origins().join("&"),
            self.destinations().join("&"),
        )
    }

    fn start(&self) -> TransitTime {
        self.run_datetime
    }

    fn origins(&self) -> Vec<String> {
        self.origins.iter().map(|s| s.name.clone()).collect()
    }

    fn destinations(&self) -> Vec<String> {
        self.destinations.iter().map(|s| s.name.clone()).collect()
    }

    fn operator(&self) -> Option<&str> {
        Some(&self.operator.name)
    }

    fn stop_count(&self) -> usize {
        self.calls.len()
    }

    fn stop_at(&self, index: usize) -> Option<&dyn TripStop> {
        self.calls.get(index).map(|c| c as &dyn TripStop)
    }

    fn colour(&self) -> Option<ColourPair> {
        self.operator.colours
    }

    fn url(&self) -> Option<String> {
        Some(urls::train_service_url(&self.uid, self.run_datetime.date()))
    }
}

/// Free-text query that finds this station on a map search.
pub fn station_search_term(stop: &TrainStop) -> String {
    format!("{} train station {}", stop.station.name, stop.station.crs)
}
