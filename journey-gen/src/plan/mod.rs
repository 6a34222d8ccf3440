//! Journey plans: which trips to ride and where to get on and off.

mod builder;
mod error;
mod file;

pub use builder::JourneyBuilder;
pub use error::PlanError;
pub use file::{
    ColourPlan, ExplicitColours, JourneyPlan, LegPlan, Plan, PointPlan, TripLegPlan, WalkLegPlan,
};
