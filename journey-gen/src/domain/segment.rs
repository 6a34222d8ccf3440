//! Segments: the part of a trip actually travelled.
//!
//! A `Segment` shares its trip through an `Arc` and records the boarding
//! and alighting positions as indices. Matching is by `TripStop::identifier`,
//! so it works the same for every mode.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;

use super::{DomainError, Leg, SegmentColours, TransitTime, Trip, TripStop, duration_string, stops};

/// Position of a call within a trip's calling sequence.
///
/// Used instead of the stop identifier because a trip may call at the same
/// stop more than once.
///
/// ```
/// use journey_gen::domain::StopIndex;
///
/// let idx = StopIndex(2);
/// assert_eq!(idx.next(), StopIndex(3));
/// assert_eq!(StopIndex(0).prev(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl StopIndex {
    pub fn next(self) -> Self {
        StopIndex(self.0 + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(StopIndex)
    }
}

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopIndex {
    fn from(value: usize) -> Self {
        StopIndex(value)
    }
}

/// A boarding-to-alighting range of one trip, with the colours it is drawn in.
///
/// # Invariants
///
/// - `board < alight`
/// - both indices are valid for the trip
#[derive(Debug)]
pub struct Segment<T: ?Sized = Leg> {
    trip: Arc<T>,
    board: StopIndex,
    alight: StopIndex,
    colours: SegmentColours,
}

impl<T: ?Sized> Clone for Segment<T> {
    fn clone(&self) -> Self {
        Self {
            trip: Arc::clone(&self.trip),
            board: self.board,
            alight: self.alight,
            colours: self.colours,
        }
    }
}

/// Find the travelled part of `trip` between two stop identifiers.
///
/// Takes the first stop matching `board`, then the first stop after it
/// matching `alight`. An `alight` match before any boarding match is
/// ignored, and `board == alight` never matches.
///
/// # Errors
///
/// `DomainError::SegmentNotFound` when no such pair exists. Callers treat
/// this as "skip this leg" rather than as bad data.
///
/// ```
/// use std::sync::Arc;
/// use journey_gen::domain::{Trip, WalkPoint, WalkTrip, TransitTime, extract_segment};
/// use chrono::{Duration, NaiveDate};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let walk = WalkTrip::new(
///     WalkPoint::new("A", 51.0, -2.0),
///     WalkPoint::new("B", 51.1, -2.1),
///     TransitTime::parse_hhmm("09:00", date).unwrap(),
///     800.0,
///     Duration::minutes(10),
/// ).unwrap();
///
/// let segment = extract_segment(Arc::new(walk), "@51, -2", "@51.1, -2.1").unwrap();
/// assert_eq!(segment.duration_string().unwrap(), "10m");
/// ```
pub fn extract_segment<T: Trip + ?Sized>(
    trip: Arc<T>,
    board: &str,
    alight: &str,
) -> Result<Segment<T>, DomainError> {
    let not_found = || DomainError::SegmentNotFound {
        board: board.to_string(),
        alight: alight.to_string(),
    };

    if board == alight {
        return Err(not_found());
    }

    let mut board_idx = None;
    let mut found = None;
    for (i, stop) in stops(&*trip).enumerate() {
        let id = stop.identifier();
        match board_idx {
            None if id == board => board_idx = Some(i),
            Some(b) if id == alight => {
                found = Some((b, i));
                break;
            }
            _ => {}
        }
    }

    let (b, a) = found.ok_or_else(not_found)?;
    Ok(Segment {
        trip,
        board: StopIndex(b),
        alight: StopIndex(a),
        colours: SegmentColours::default(),
    })
}

impl<T: Trip + ?Sized> Segment<T> {
    pub fn trip(&self) -> &Arc<T> {
        &self.trip
    }

    pub fn board_index(&self) -> StopIndex {
        self.board
    }

    pub fn alight_index(&self) -> StopIndex {
        self.alight
    }

    pub fn colours(&self) -> SegmentColours {
        self.colours
    }

    /// Replace the colours this segment is drawn in.
    pub fn with_colours(mut self, colours: SegmentColours) -> Self {
        self.colours = colours;
        self
    }

    fn call(&self, idx: StopIndex) -> &dyn TripStop {
        match self.trip.stop_at(idx.0) {
            Some(stop) => stop,
            // Indices validated at construction
            None => unreachable!("segment index {idx} out of range"),
        }
    }

    pub fn board_stop(&self) -> &dyn TripStop {
        self.call(self.board)
    }

    pub fn alight_stop(&self) -> &dyn TripStop {
        self.call(self.alight)
    }

    /// Stops from board to alight, inclusive.
    pub fn stops(&self) -> impl Iterator<Item = &dyn TripStop> + '_ {
        (self.board.0..=self.alight.0).filter_map(move |i| self.trip.stop_at(i))
    }

    /// Stops strictly between board and alight.
    pub fn intermediate_stops(&self) -> impl Iterator<Item = &dyn TripStop> + '_ {
        (self.board.0 + 1..self.alight.0).filter_map(move |i| self.trip.stop_at(i))
    }

    /// Departure from the boarding stop.
    pub fn board_time(&self) -> Result<TransitTime, DomainError> {
        self.board_stop()
            .departure()
            .ok_or(DomainError::IncompleteTiming("boarding departure"))
    }

    /// Arrival at the alighting stop.
    pub fn alight_time(&self) -> Result<TransitTime, DomainError> {
        self.alight_stop()
            .arrival()
            .ok_or(DomainError::IncompleteTiming("alighting arrival"))
    }

    pub fn duration(&self) -> Result<Duration, DomainError> {
        Ok(self.alight_time()?.signed_duration_since(self.board_time()?))
    }

    /// Duration as e.g. "1h5m".
    pub fn duration_string(&self) -> Result<String, DomainError> {
        self.duration().map(duration_string)
    }
}
