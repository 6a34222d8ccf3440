//! Links to public pages for stops, trips and walks.
//!
//! Trains link to RealTimeTrains, buses to bustimes.org, and walks to
//! OpenStreetMap.

use chrono::NaiveDate;

use crate::domain::{AtcoCode, Coordinates, Crs, TransitTime};

const RTT: &str = "https://www.realtimetrains.co.uk";
const BUSTIMES: &str = "https://bustimes.org";
const OSM: &str = "https://www.openstreetmap.org";

/// RTT detailed page for one day's run of a service.
pub fn train_service_url(uid: &str, date: NaiveDate) -> String {
    format!(
        "{RTT}/service/gb-nr:{uid}/{}/detailed",
        date.format("%Y-%m-%d")
    )
}

/// RTT departures board for a station, optionally from a given time.
///
/// ```
/// use journey_gen::domain::Crs;
/// use journey_gen::urls::train_station_url;
///
/// let url = train_station_url(&Crs::parse("BTH").unwrap(), None);
/// assert_eq!(url, "https://www.realtimetrains.co.uk/search/detailed/gb-nr:BTH");
/// ```
pub fn train_station_url(station: &Crs, at: Option<TransitTime>) -> String {
    let base = format!("{RTT}/search/detailed/gb-nr:{}", station.as_str());
    match at {
        Some(t) => format!("{base}/{}/{}", t.date().format("%Y-%m-%d"), t.short_string()),
        None => base,
    }
}

/// bustimes.org departures for a stop, optionally around a given time.
pub fn bus_stop_url(atco: &AtcoCode, at: Option<TransitTime>) -> String {
    let base = format!("{BUSTIMES}/stops/{atco}");
    match at {
        Some(t) => format!(
            "{base}?date={}&time={:02}%3A{:02}",
            t.date().format("%Y-%m-%d"),
            t.hour(),
            t.minute()
        ),
        None => base,
    }
}

pub fn bus_trip_url(id: u64) -> String {
    format!("{BUSTIMES}/trips/{id}")
}

pub fn bus_service_url(slug: &str) -> String {
    format!("{BUSTIMES}/services/{slug}")
}

/// Map centred on a point, with a marker.
pub fn osm_map_url(at: Coordinates, zoom: u8) -> String {
    let (lat, lon) = (at.latitude, at.longitude);
    format!("{OSM}/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}")
}

/// Foot routing between two points.
pub fn walking_directions_url(from: Coordinates, to: Coordinates) -> String {
    format!(
        "{OSM}/directions?engine=graphhopper_foot&route={}%2C{}%3B{}%2C{}",
        from.latitude, from.longitude, to.latitude, to.longitude
    )
}
