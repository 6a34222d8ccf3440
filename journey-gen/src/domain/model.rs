//! Capability traits shared by every transport mode.
//!
//! Bus, train and walking data arrive in very different shapes. Each mode
//! implements `Stop`, `TripStop` and `Trip` for its own types, and
//! everything downstream (segment extraction, colour resolution,
//! rendering) is written against these traits only.
//!
//! Conveniences that are the same for every mode (coordinate accessors,
//! time strings, joined origin/destination names) are free functions here
//! rather than default methods, so implementors only provide raw data.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::{ColourPair, DomainError, TransitTime};

/// Identifier scheme for railway stations.
pub const SCHEME_CRS: &str = "crs";
/// Identifier scheme for bus stops (primary).
pub const SCHEME_ATCO: &str = "atco";
/// Identifier scheme for bus stops (SMS/public code).
pub const SCHEME_NAPTAN: &str = "naptan";
/// Identifier scheme for bare positions, as "@{lat}, {lon}".
pub const SCHEME_COORDS: &str = "coords";

/// Identifiers a stop is known by, keyed by scheme name.
pub type Identifiers = BTreeMap<&'static str, String>;

/// WGS84 position of a stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both or neither: a lone latitude or longitude is discarded.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Some(Self::new(latitude?, longitude?))
    }
}

/// A physical place a trip may call at.
pub trait Stop {
    /// Display name.
    fn name(&self) -> Cow<'_, str>;

    /// Position, if known.
    fn coordinates(&self) -> Option<Coordinates>;

    /// Platform, bay or stop indicator.
    fn location_label(&self) -> Option<&str>;

    /// All identifiers this stop has, keyed by scheme.
    fn identifiers(&self) -> Identifiers;

    /// A page describing this stop.
    fn url(&self) -> String;
}

/// A stop visited at a particular point of a particular trip.
pub trait TripStop {
    fn stop(&self) -> &dyn Stop;

    /// The identifier segment extraction matches board/alight choices
    /// against (CRS for trains, ATCO for buses).
    fn identifier(&self) -> Cow<'_, str>;

    fn arrival(&self) -> Option<TransitTime>;

    fn departure(&self) -> Option<TransitTime>;

    /// A page for this call, e.g. the station's departures around this time.
    fn url(&self) -> String {
        self.stop().url()
    }
}

/// A specific run of a service: an ordered, non-empty sequence of calls.
pub trait Trip {
    /// Short identifier such as a service number or headcode.
    fn identifier(&self) -> &str;

    /// Full human-readable name.
    fn name(&self) -> String;

    fn start(&self) -> TransitTime;

    fn origins(&self) -> Vec<String>;

    fn destinations(&self) -> Vec<String>;

    fn operator(&self) -> Option<&str>;

    /// Number of calls. Never zero for a constructed trip.
    fn stop_count(&self) -> usize;

    /// Call at `index`, in real-world calling order.
    fn stop_at(&self, index: usize) -> Option<&dyn TripStop>;

    /// A colour the source already knows for this route, if any.
    fn colour(&self) -> Option<ColourPair>;

    /// A page describing this trip.
    fn url(&self) -> Option<String>;
}

/// Iterate a trip's calls in order.
pub fn stops<T: Trip + ?Sized>(trip: &T) -> impl Iterator<Item = &dyn TripStop> + '_ {
    (0..trip.stop_count()).filter_map(move |i| trip.stop_at(i))
}

pub fn latitude<S: Stop + ?Sized>(stop: &S) -> Option<f64> {
    stop.coordinates().map(|c| c.latitude)
}

pub fn longitude<S: Stop + ?Sized>(stop: &S) -> Option<f64> {
    stop.coordinates().map(|c| c.longitude)
}

/// Look up one identifier scheme on a stop.
pub fn identifier<S: Stop + ?Sized>(stop: &S, scheme: &str) -> Option<String> {
    stop.identifiers().remove(scheme)
}

/// Arrival as "HH:MM", if present.
pub fn arrival_string<S: TripStop + ?Sized>(stop: &S) -> Option<String> {
    stop.arrival().map(|t| t.to_string())
}

/// Departure as "HH:MM", if present.
pub fn departure_string<S: TripStop + ?Sized>(stop: &S) -> Option<String> {
    stop.departure().map(|t| t.to_string())
}

/// "{identifier} - {name}"
pub fn full_name<T: Trip + ?Sized>(trip: &T) -> String {
    format!("{} - {}", trip.identifier(), trip.name())
}

pub fn origin_string<T: Trip + ?Sized>(trip: &T) -> String {
    trip.origins().join(" & ")
}

pub fn destination_string<T: Trip + ?Sized>(trip: &T) -> String {
    trip.destinations().join(" & ")
}

/// Check the calling-pattern invariants every mode's constructor enforces:
/// at least one call, arrival no later than departure, and only the first
/// and last call may be untimed.
pub(crate) fn validate_calls<S: TripStop>(calls: &[S]) -> Result<(), DomainError> {
    if calls.is_empty() {
        return Err(DomainError::EmptyTrip);
    }

    let last = calls.len() - 1;
    for (i, call) in calls.iter().enumerate() {
        match (call.arrival(), call.departure()) {
            (Some(arr), Some(dep)) if arr > dep => {
                return Err(DomainError::ArrivalAfterDeparture(
                    call.stop().name().into_owned(),
                ));
            }
            (None, None) if i != 0 && i != last => {
                return Err(DomainError::UntimedIntermediateStop(
                    call.stop().name().into_owned(),
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Place(&'static str, Option<Coordinates>);

    impl Stop for Place {
        fn name(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.0)
        }
        fn coordinates(&self) -> Option<Coordinates> {
            self.1
        }
        fn location_label(&self) -> Option<&str> {
            None
        }
        fn identifiers(&self) -> Identifiers {
            Identifiers::from([("test", self.0.to_string())])
        }
        fn url(&self) -> String {
            format!("https://example.test/{}", self.0)
        }
    }

    struct Visit(Place, Option<TransitTime>, Option<TransitTime>);

    impl TripStop for Visit {
        fn stop(&self) -> &dyn Stop {
            &self.0
        }
        fn identifier(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.0.0)
        }
        fn arrival(&self) -> Option<TransitTime> {
            self.1
        }
        fn departure(&self) -> Option<TransitTime> {
            self.2
        }
    }

    fn t(s: &str) -> Option<TransitTime> {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        Some(TransitTime::parse_hhmm(s, date).unwrap())
    }

    #[test]
    fn coordinates_both_or_neither() {
        assert!(Coordinates::from_parts(Some(51.5), None).is_none());
        assert!(Coordinates::from_parts(None, Some(-0.1)).is_none());
        assert_eq!(
            Coordinates::from_parts(Some(51.5), Some(-0.1)),
            Some(Coordinates::new(51.5, -0.1))
        );
    }

    #[test]
    fn free_accessors() {
        let place = Place("A", Some(Coordinates::new(51.5, -0.1)));
        assert_eq!(latitude(&place), Some(51.5));
        assert_eq!(longitude(&place), Some(-0.1));
        assert_eq!(identifier(&place, "test"), Some("A".to_string()));
        assert_eq!(identifier(&place, "crs"), None);

        let nowhere = Place("B", None);
        assert_eq!(latitude(&nowhere), None);
        assert_eq!(longitude(&nowhere), None);
    }

    #[test]
    fn time_strings_and_default_url() {
        let visit = Visit(Place("A", None), t("10:00"), None);
        assert_eq!(arrival_string(&visit), Some("10:00".to_string()));
        assert_eq!(departure_string(&visit), None);
        assert_eq!(visit.url(), "https://example.test/A");
    }

    #[test]
    fn validate_accepts_untimed_ends() {
        let calls = vec![
            Visit(Place("A", None), None, None),
            Visit(Place("B", None), t("10:00"), t("10:02")),
            Visit(Place("C", None), None, None),
        ];
        assert!(validate_calls(&calls).is_ok());
    }

    #[test]
    fn validate_rejects_bad_patterns() {
        let empty: Vec<Visit> = vec![];
        assert_eq!(validate_calls(&empty), Err(DomainError::EmptyTrip));

        let backwards = vec![Visit(Place("A", None), t("10:05"), t("10:00"))];
        assert_eq!(
            validate_calls(&backwards),
            Err(DomainError::ArrivalAfterDeparture("A".into()))
        );

        let untimed_middle = vec![
            Visit(Place("A", None), None, t("10:00")),
            Visit(Place("B", None), None, None),
            Visit(Place("C", None), t("10:30"), None),
        ];
        assert_eq!(
            validate_calls(&untimed_middle),
            Err(DomainError::UntimedIntermediateStop("B".into()))
        );
    }
}
