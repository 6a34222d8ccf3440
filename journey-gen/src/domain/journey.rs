//! A named sequence of segments.

use chrono::Duration;

use super::{DomainError, Segment, TransitTime, duration_string};

/// One journey from a plan: the segments actually travelled, in order.
#[derive(Debug, Clone)]
pub struct Journey {
    pub name: String,
    pub segments: Vec<Segment>,
}

impl Journey {
    pub fn new(name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            name: name.into(),
            segments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Departure from the first boarding point.
    pub fn departure(&self) -> Option<Result<TransitTime, DomainError>> {
        self.segments.first().map(Segment::board_time)
    }

    /// Arrival at the last alighting point.
    pub fn arrival(&self) -> Option<Result<TransitTime, DomainError>> {
        self.segments.last().map(Segment::alight_time)
    }

    /// Door-to-door time, including waits between segments.
    pub fn duration(&self) -> Result<Option<Duration>, DomainError> {
        match (self.departure(), self.arrival()) {
            (Some(dep), Some(arr)) => Ok(Some(arr?.signed_duration_since(dep?))),
            _ => Ok(None),
        }
    }

    pub fn duration_string(&self) -> Result<Option<String>, DomainError> {
        Ok(self.duration()?.map(duration_string))
    }
}
