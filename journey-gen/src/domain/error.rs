//! Domain error types.
//!
//! These errors represent validation failures and data gaps in the trip
//! model. They are distinct from gateway and cache IO errors.

/// Domain-level errors for trip construction and segment queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// No boarding/alighting pair matched within the trip
    #[error("no segment from {board} to {alight} on this trip")]
    SegmentNotFound { board: String, alight: String },

    /// A time needed for the requested operation is absent
    #[error("incomplete timing: missing {0}")]
    IncompleteTiming(&'static str),

    /// A trip must call at one stop at least
    #[error("trip must have at least one stop")]
    EmptyTrip,

    /// A stop's arrival is after its departure
    #[error("arrival after departure at {0}")]
    ArrivalAfterDeparture(String),

    /// An intermediate stop has neither arrival nor departure
    #[error("untimed intermediate stop at {0}")]
    UntimedIntermediateStop(String),
}

impl DomainError {
    /// Whether this is a legitimate "nothing to extract" outcome rather than
    /// bad data.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::SegmentNotFound { .. })
    }
}
