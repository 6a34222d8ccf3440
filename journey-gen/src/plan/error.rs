use std::path::PathBuf;

use crate::colour::ColourError;
use crate::domain::DomainError;
use crate::gateway::GatewayError;

/// Errors loading a plan or building journeys from it.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("failed to read plan {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse plan: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time {0:?}: expected YYYY-MM-DDTHH:MM")]
    InvalidTime(String),

    #[error("invalid {field} colour {value:?}: expected #rrggbb")]
    InvalidColour { field: &'static str, value: String },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Colour(#[from] ColourError),
}

impl PlanError {
    /// Whether the leg this came from should be skipped rather than
    /// failing the whole plan.
    pub fn is_not_found(&self) -> bool {
        match self {
            PlanError::Gateway(e) => e.is_not_found(),
            PlanError::Domain(e) => e.is_not_found(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_covers_missing_trips_and_stops() {
        let missing_trip = PlanError::from(GatewayError::NotFound {
            identifier: "P12345".into(),
        });
        assert!(missing_trip.is_not_found());

        let missing_stop = PlanError::from(DomainError::SegmentNotFound {
            board: "RDG".into(),
            alight: "XXX".into(),
        });
        assert!(missing_stop.is_not_found());

        assert!(!PlanError::InvalidDate("tomorrow".into()).is_not_found());
        assert!(!PlanError::from(GatewayError::Unauthorized).is_not_found());
    }

    #[test]
    fn messages() {
        let err = PlanError::InvalidColour {
            field: "bg",
            value: "blue".into(),
        };
        assert_eq!(err.to_string(), "invalid bg colour \"blue\": expected #rrggbb");
    }
}
