//! Walking legs between two points.

use std::borrow::Cow;

use chrono::Duration;

use super::model::SCHEME_COORDS;
use super::{ColourPair, Coordinates, DomainError, Identifiers, Stop, TransitTime, Trip, TripStop};
use crate::urls;

/// Zoom level used when linking to a single walk point on the map.
const POINT_ZOOM: u8 = 18;

/// A named position a walk starts or ends at.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkPoint {
    pub name: String,
    pub coordinates: Coordinates,
}

impl WalkPoint {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::new(latitude, longitude),
        }
    }

    /// The position as "@{lat}, {lon}", which walk segments match on.
    pub fn position_id(&self) -> String {
        let c = self.coordinates;
        format!("@{}, {}", c.latitude, c.longitude)
    }
}

impl Stop for WalkPoint {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn coordinates(&self) -> Option<Coordinates> {
        Some(self.coordinates)
    }

    fn location_label(&self) -> Option<&str> {
        None
    }

    fn identifiers(&self) -> Identifiers {
        Identifiers::from([(SCHEME_COORDS, self.position_id())])
    }

    fn url(&self) -> String {
        urls::osm_map_url(self.coordinates, POINT_ZOOM)
    }
}

/// One end of a walk. Arrival and departure are the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkStop {
    pub point: WalkPoint,
    pub time: TransitTime,
}

impl TripStop for WalkStop {
    fn stop(&self) -> &dyn Stop {
        &self.point
    }

    fn identifier(&self) -> Cow<'_, str> {
        Cow::Owned(self.point.position_id())
    }

    fn arrival(&self) -> Option<TransitTime> {
        Some(self.time)
    }

    fn departure(&self) -> Option<TransitTime> {
        Some(self.time)
    }
}

/// A walk from one point to another, always exactly two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkTrip {
    origin: WalkStop,
    destination: WalkStop,
    distance_m: f64,
    duration: Duration,
}

impl WalkTrip {
    /// A walk leaving `origin` at `depart` and taking `duration`.
    pub fn new(
        origin: WalkPoint,
        destination: WalkPoint,
        depart: TransitTime,
        distance_m: f64,
        duration: Duration,
    ) -> Result<Self, DomainError> {
        let arrive = depart
            .checked_add(duration)
            .ok_or(DomainError::IncompleteTiming("walk arrival"))?;
        Ok(Self {
            origin: WalkStop {
                point: origin,
                time: depart,
            },
            destination: WalkStop {
                point: destination,
                time: arrive,
            },
            distance_m,
            duration,
        })
    }

    pub fn origin(&self) -> &WalkStop {
        &self.origin
    }

    pub fn destination(&self) -> &WalkStop {
        &self.destination
    }

    /// Walking distance in metres.
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Trip for WalkTrip {
    fn identifier(&self) -> &str {
        "Walk"
    }

    fn name(&self) -> String {
        format!("{} - {}", self.origin.point.name, self.destination.point.name)
    }

    fn start(&self) -> TransitTime {
        self.origin.time
    }

    fn origins(&self) -> Vec<String> {
        vec![self.origin.point.name.clone()]
    }

    fn destinations(&self) -> Vec<String> {
        vec![self.destination.point.name.clone()]
    }

    fn operator(&self) -> Option<&str> {
        None
    }

    fn stop_count(&self) -> usize {
        2
    }

    fn stop_at(&self, index: usize) -> Option<&dyn TripStop> {
        match index {
            0 => Some(&self.origin),
            1 => Some(&self.destination),
            _ => None,
        }
    }

    fn colour(&self) -> Option<ColourPair> {
        None
    }

    fn url(&self) -> Option<String> {
        Some(urls::walking_directions_url(
            self.origin.point.coordinates,
            self.destination.point.coordinates,
        ))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    pub fn depart() -> TransitTime {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        TransitTime::parse_hhmm("11:35", date).unwrap()
    }

    pub fn walk() -> WalkTrip {
        WalkTrip::new(
            WalkPoint::new("Temple Meads", 51.4491, -2.5813),
            WalkPoint::new("Bus Station", 51.4592, -2.5923),
            depart(),
            1450.0,
            Duration::minutes(18),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn walk_is_two_stops() {
        let walk = walk();
        assert_eq!(walk.identifier(), "Walk");
        assert_eq!(walk.name(), "Temple Meads - Bus Station");
        assert_eq!(walk.stop_count(), 2);
        assert!(walk.stop_at(2).is_none());
        assert!(walk.operator().is_none());
        assert_eq!(walk.distance_m(), 1450.0);
    }

    #[test]
    fn arrival_is_departure_plus_duration() {
        let walk = walk();
        assert_eq!(walk.start(), depart());
        assert_eq!(walk.origin().arrival(), walk.origin().departure());
        assert_eq!(walk.destination().arrival().unwrap().to_string(), "11:53");
    }

    #[test]
    fn stop_identifier_is_position() {
        let walk = walk();
        assert_eq!(walk.origin().identifier(), "@51.4491, -2.5813");
        assert_eq!(
            walk.origin().stop().identifiers()[SCHEME_COORDS],
            "@51.4491, -2.5813"
        );
    }

    #[test]
    fn matching_identifier_is_one_of_the_stop_schemes() {
        let walk = walk();
        for call in crate::domain::stops(&walk) {
            let ids = call.stop().identifiers();
            assert!(!ids.is_empty());
            assert!(ids.values().any(|id| *id == call.identifier()));
        }
    }

    #[test]
    fn urls_point_at_openstreetmap() {
        let walk = walk();
        assert_eq!(
            walk.origin().url(),
            "https://www.openstreetmap.org/?mlat=51.4491&mlon=-2.5813#map=18/51.4491/-2.5813"
        );
        assert_eq!(
            walk.url().unwrap(),
            "https://www.openstreetmap.org/directions?engine=graphhopper_foot\
             &route=51.4491%2C-2.5813%3B51.4592%2C-2.5923"
        );
    }
}
