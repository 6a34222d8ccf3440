//! The tagged union of transport modes.
//!
//! `Leg` lets bus, train and walk trips live in one collection and be
//! passed wherever a `Trip` is expected. Code that needs mode-specific
//! data (colour cache keys, search terms) matches on the variant.

use std::fmt;

use super::{BusTrip, ColourPair, TrainService, TransitTime, Trip, TripStop, WalkTrip};

/// Transport mode of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Bus,
    Train,
    Walk,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Bus => "bus",
            Mode::Train => "train",
            Mode::Walk => "walk",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trip of any mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Leg {
    Bus(BusTrip),
    Train(TrainService),
    Walk(WalkTrip),
}

impl Leg {
    pub fn mode(&self) -> Mode {
        match self {
            Leg::Bus(_) => Mode::Bus,
            Leg::Train(_) => Mode::Train,
            Leg::Walk(_) => Mode::Walk,
        }
    }

    /// The wrapped trip as a trait object.
    pub fn as_trip(&self) -> &dyn Trip {
        match self {
            Leg::Bus(t) => t,
            Leg::Train(t) => t,
            Leg::Walk(t) => t,
        }
    }
}

impl From<BusTrip> for Leg {
    fn from(trip: BusTrip) -> Self {
        Leg::Bus(trip)
    }
}

impl From<TrainService> for Leg {
    fn from(service: TrainService) -> Self {
        Leg::Train(service)
    }
}

impl From<WalkTrip> for Leg {
    fn from(walk: WalkTrip) -> Self {
        Leg::Walk(walk)
    }
}

impl Trip for Leg {
    fn identifier(&self) -> &str {
        self.as_trip().identifier()
    }

    fn name(&self) -> String {
        self.as_trip().name()
    }

    fn start(&self) -> TransitTime {
        self.as_trip().start()
    }

    fn origins(&self) -> Vec<String> {
        self.as_trip().origins()
    }

    fn destinations(&self) -> Vec<String> {
        self.as_trip().destinations()
    }

    fn operator(&self) -> Option<&str> {
        self.as_trip().operator()
    }

    fn stop_count(&self) -> usize {
        self.as_trip().stop_count()
    }

    fn stop_at(&self, index: usize) -> Option<&dyn TripStop> {
        self.as_trip().stop_at(index)
    }

    fn colour(&self) -> Option<ColourPair> {
        self.as_trip().colour()
    }

    fn url(&self) -> Option<String> {
        self.as_trip().url()
    }
}
