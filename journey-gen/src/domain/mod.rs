//! Domain types for journey generation.
//!
//! The stop/trip capability traits live in `model`; each transport mode
//! implements them for its own types, and `Leg` wraps the modes in one
//! enum. Value types (codes, colours, times) validate at construction so
//! code receiving them can trust their contents.

pub(crate) mod bus;
mod codes;
mod colour;
mod error;
mod journey;
mod leg;
mod model;
mod segment;
mod time;
pub(crate) mod train;
pub(crate) mod walk;

pub use bus::{BusService, BusStop, BusTrip, BusTripStop, bus_stop_search_term};
pub use codes::{AtcoCode, Crs, InvalidCode};
pub use colour::{Colour, ColourPair, InvalidColour, SegmentColours};
pub use error::DomainError;
pub use journey::Journey;
pub use leg::{Leg, Mode};
pub use model::{
    Coordinates, Identifiers, SCHEME_ATCO, SCHEME_COORDS, SCHEME_CRS, SCHEME_NAPTAN, Stop, Trip, TripStop,
    arrival_string, departure_string, destination_string, full_name, identifier, latitude,
    longitude, origin_string, stops,
};
pub use segment::{Segment, StopIndex, extract_segment};
pub use time::{TimeError, TransitTime, duration_string, parse_time_sequence};
pub use train::{
    TrainCall, TrainOperator, TrainService, TrainStation, TrainStop, station_search_term,
};
pub use walk::{WalkPoint, WalkStop, WalkTrip};
