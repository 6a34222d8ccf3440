//! Bus stops and bus trips.

use std::borrow::Cow;

use super::model::{SCHEME_ATCO, SCHEME_NAPTAN, validate_calls};
use super::{
    AtcoCode, ColourPair, Coordinates, DomainError, Identifiers, Stop, TransitTime, Trip,
    TripStop,
};
use crate::urls;

/// A bus stop from the national stop register.
#[derive(Debug, Clone, PartialEq)]
pub struct BusStop {
    pub atco: AtcoCode,
    pub naptan: Option<String>,
    pub name: String,
    pub locality: Option<String>,
    pub parent_locality: Option<String>,
    pub street: Option<String>,
    /// Stop letter or direction, e.g. "Stop K" or "opp".
    pub indicator: Option<String>,
    pub bearing: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl BusStop {
    pub fn new(atco: AtcoCode, name: impl Into<String>) -> Self {
        Self {
            atco,
            naptan: None,
            name: name.into(),
            locality: None,
            parent_locality: None,
            street: None,
            indicator: None,
            bearing: None,
            coordinates: None,
        }
    }
}

impl Stop for BusStop {
    fn name(&self) -> Cow<'_, str> {
        match &self.indicator {
            Some(indicator) => Cow::Owned(format!("{} ({})", self.name, indicator)),
            None => Cow::Borrowed(&self.name),
        }
    }

    fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    fn location_label(&self) -> Option<&str> {
        self.indicator.as_deref()
    }

    fn identifiers(&self) -> Identifiers {
        let mut ids = Identifiers::from([(SCHEME_ATCO, self.atco.to_string())]);
        if let Some(naptan) = &self.naptan {
            ids.insert(SCHEME_NAPTAN, naptan.clone());
        }
        ids
    }

    fn url(&self) -> String {
        urls::bus_stop_url(&self.atco, None)
    }
}

/// A bus calling at a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct BusTripStop {
    pub stop: BusStop,
    pub arrival: Option<TransitTime>,
    pub departure: Option<TransitTime>,
}

impl TripStop for BusTripStop {
    fn stop(&self) -> &dyn Stop {
        &self.stop
    }

    fn identifier(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.stop.atco.as_str())
    }

    fn arrival(&self) -> Option<TransitTime> {
        self.arrival
    }

    fn departure(&self) -> Option<TransitTime> {
        self.departure
    }

    fn url(&self) -> String {
        urls::bus_stop_url(&self.stop.atco, self.departure.or(self.arrival))
    }
}

/// Descriptive data about the bus service a trip runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct BusService {
    /// Public service number, e.g. "X39".
    pub number: String,
    /// Service slug on the timetable site; also the colour cache key.
    pub slug: String,
    pub origin: String,
    pub destination: String,
    pub operator: String,
    pub colour: Option<ColourPair>,
}

impl BusService {
    /// Timetable page for the whole service.
    pub fn url(&self) -> String {
        urls::bus_service_url(&self.slug)
    }
}

/// A single run of a bus service.
#[derive(Debug, Clone, PartialEq)]
pub struct BusTrip {
    id: u64,
    service: BusService,
    start: TransitTime,
    stops: Vec<BusTripStop>,
}

impl BusTrip {
    /// Build a trip, validating the calling pattern.
    ///
    /// The trip starts at the first time found in calling order.
    pub fn new(id: u64, service: BusService, stops: Vec<BusTripStop>) -> Result<Self, DomainError> {
        validate_calls(&stops)?;
        let start = stops
            .iter()
            .find_map(|s| s.departure.or(s.arrival))
            .ok_or(DomainError::IncompleteTiming("trip start"))?;
        Ok(Self {
            id,
            service,
            start,
            stops,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn service(&self) -> &BusService {
        &self.service
    }

    pub fn stops(&self) -> &[BusTripStop] {
        &self.stops
    }
}

impl Trip for BusTrip {
    fn identifier(&self) -> &str {
        &self.service.number
    }

    fn name(&self) -> String {
        format!("{} - {}", self.service.origin, self.service.destination)
    }

    fn start(&self) -> TransitTime {
        self.start
    }

    fn origins(&self) -> Vec<String> {
        vec![self.service.origin.clone()]
    }

    fn destinations(&self) -> Vec<String> {
        vec![self.service.destination.clone()]
    }

    fn operator(&self) -> Option<&str> {
        Some(&self.service.operator)
    }

    fn stop_count(&self) -> usize {
        self.stops.len()
    }

    fn stop_at(&self, index: usize) -> Option<&dyn TripStop> {
        self.stops.get(index).map(|s| s as &dyn TripStop)
    }

    fn colour(&self) -> Option<ColourPair> {
        self.service.colour
    }

    fn url(&self) -> Option<String> {
        Some(urls::bus_trip_url(self.id))
    }
}

/// Free-text query that finds this stop on a map search.
pub fn bus_stop_search_term(stop: &BusStop) -> String {
    let parts = [
        Some(stop.name.as_str()),
        stop.indicator.as_deref(),
        stop.street.as_deref(),
        stop.parent_locality.as_deref(),
    ];
    let mut term = String::from("bus stop");
    for part in parts.into_iter().flatten() {
        term.push(' ');
        term.push_str(part);
    }
    term
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    pub fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    pub fn time(s: &str) -> TransitTime {
        TransitTime::parse_hhmm(s, date()).unwrap()
    }

    pub fn stop(atco: &str, name: &str, indicator: Option<&str>) -> BusStop {
        let mut stop = BusStop::new(AtcoCode::parse(atco).unwrap(), name);
        stop.indicator = indicator.map(str::to_string);
        stop
    }

    pub fn call(atco: &str, name: &str, arr: Option<&str>, dep: Option<&str>) -> BusTripStop {
        BusTripStop {
            stop: stop(atco, name, None),
            arrival: arr.map(time),
            departure: dep.map(time),
        }
    }

    pub fn service() -> BusService {
        BusService {
            number: "X39".into(),
            slug: "x39-bristol-bath".into(),
            origin: "Bristol".into(),
            destination: "Bath".into(),
            operator: "First West of England".into(),
            colour: None,
        }
    }

    pub fn trip() -> BusTrip {
        BusTrip::new(
            4242,
            service(),
            vec![
                call("0100BRP90312", "Bus Station", None, Some("10:00")),
                call("0100BRA10001", "Temple Meads", Some("10:06"), Some("10:07")),
                call("0180BAC30294", "Keynsham", Some("10:25"), Some("10:25")),
                call("0180BAC30001", "Bath Bus Station", Some("10:55"), None),
            ],
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::domain::{full_name, stops};

    #[test]
    fn stop_name_includes_indicator() {
        assert_eq!(stop("0100BRP90312", "Bus Station", Some("Bay 4")).name(), "Bus Station (Bay 4)");
        assert_eq!(stop("0100BRP90312", "Bus Station", None).name(), "Bus Station");
    }

    #[test]
    fn stop_identifiers() {
        let mut s = stop("0100BRP90312", "Bus Station", None);
        assert_eq!(s.identifiers().len(), 1);
        assert_eq!(s.identifiers()[SCHEME_ATCO], "0100BRP90312");

        s.naptan = Some("bstgwpm".into());
        assert_eq!(s.identifiers()[SCHEME_NAPTAN], "bstgwpm");
        assert_eq!(s.location_label(), None);
    }

    #[test]
    fn trip_capabilities() {
        let trip = trip();
        assert_eq!(trip.identifier(), "X39");
        assert_eq!(trip.name(), "Bristol - Bath");
        assert_eq!(full_name(&trip), "X39 - Bristol - Bath");
        assert_eq!(trip.start(), time("10:00"));
        assert_eq!(trip.origins(), vec!["Bristol"]);
        assert_eq!(trip.destinations(), vec!["Bath"]);
        assert_eq!(trip.operator(), Some("First West of England"));
        assert_eq!(trip.stop_count(), 4);
        assert_eq!(trip.url().unwrap(), "https://bustimes.org/trips/4242");
        assert_eq!(
            trip.service().url(),
            "https://bustimes.org/services/x39-bristol-bath"
        );

        let ids: Vec<String> = stops(&trip).map(|s| s.identifier().into_owned()).collect();
        assert_eq!(
            ids,
            ["0100BRP90312", "0100BRA10001", "0180BAC30294", "0180BAC30001"]
        );
    }

    #[test]
    fn trip_rejects_empty() {
        assert_eq!(BusTrip::new(1, service(), vec![]), Err(DomainError::EmptyTrip));
    }

    #[test]
    fn trip_needs_a_start_time() {
        let untimed = vec![call("0100BRP90312", "Bus Station", None, None)];
        assert_eq!(
            BusTrip::new(1, service(), untimed),
            Err(DomainError::IncompleteTiming("trip start"))
        );
    }

    #[test]
    fn search_term_skips_missing_parts() {
        let mut s = stop("0100BRP90312", "Bus Station", Some("Bay 4"));
        assert_eq!(bus_stop_search_term(&s), "bus stop Bus Station Bay 4");

        s.street = Some("Marlborough Street".into());
        s.parent_locality = Some("Bristol".into());
        assert_eq!(
            bus_stop_search_term(&s),
            "bus stop Bus Station Bay 4 Marlborough Street Bristol"
        );
    }
}
