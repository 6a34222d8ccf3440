//! Turning a plan into coloured journeys.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::PlanError;
use super::file::{ColourPlan, JourneyPlan, LegPlan, Plan, TripLegPlan, WalkLegPlan};
use crate::colour::{ColourResolver, LiveLookup, ManualInput, colour_request};
use crate::domain::{
    Colour, ColourPair, Journey, Leg, Segment, Trip, TripStop, extract_segment,
};
use crate::gateway::{CachedGateway, TripGateway, WalkGateway};

/// Fetches every leg of a plan, cuts it down to the part travelled and
/// decides its colours.
///
/// Colours come from, in order: the plan itself, the trip's own colour,
/// the resolver, and for walks the configured walk colours.
pub struct JourneyBuilder<T, B, L, M> {
    trains: CachedGateway<T>,
    buses: CachedGateway<B>,
    walks: WalkGateway,
    resolver: ColourResolver<L, M>,
    walk_colours: ColourPair,
}

impl<T, B, L, M> JourneyBuilder<T, B, L, M>
where
    T: TripGateway,
    B: TripGateway,
    L: LiveLookup,
    M: ManualInput,
{
    pub fn new(
        trains: CachedGateway<T>,
        buses: CachedGateway<B>,
        walks: WalkGateway,
        resolver: ColourResolver<L, M>,
    ) -> Self {
        Self {
            trains,
            buses,
            walks,
            resolver,
            walk_colours: ColourPair::new(Colour::WHITE, Colour::BLACK),
        }
    }

    pub fn with_walk_colours(mut self, colours: ColourPair) -> Self {
        self.walk_colours = colours;
        self
    }

    pub fn into_resolver(self) -> ColourResolver<L, M> {
        self.resolver
    }

    /// Build every journey in the plan.
    ///
    /// A leg whose trip does not run that day, or does not call at the
    /// requested stops in order, is left out with a warning. Any other
    /// failure stops the build.
    pub async fn build(&mut self, plan: &Plan) -> Result<Vec<Journey>, PlanError> {
        let mut journeys = Vec::with_capacity(plan.journeys.len());
        for (index, journey) in plan.journeys.iter().enumerate() {
            journeys.push(self.build_journey(index, journey).await?);
        }
        Ok(journeys)
    }

    async fn build_journey(
        &mut self,
        index: usize,
        plan: &JourneyPlan,
    ) -> Result<Journey, PlanError> {
        let name = plan
            .name
            .clone()
            .unwrap_or_else(|| format!("Journey {}", index + 1));

        let mut segments = Vec::with_capacity(plan.legs.len());
        for (leg_index, leg) in plan.legs.iter().enumerate() {
            match self.build_leg(leg).await {
                Ok(segment) => segments.push(segment),
                Err(e) if e.is_not_found() => {
                    warn!(journey = %name, leg = leg_index + 1, error = %e, "skipping leg");
                }
                Err(e) => return Err(e),
            }
        }

        info!(journey = %name, segments = segments.len(), "built journey");
        Ok(Journey::new(name, segments))
    }

    async fn build_leg(&mut self, leg: &LegPlan) -> Result<Segment, PlanError> {
        match leg {
            LegPlan::Train(plan) => {
                let trip = self.trains.fetch(&plan.id, plan.run_date()?).await?;
                self.ride(trip, plan).await
            }
            LegPlan::Bus(plan) => {
                let trip = self.buses.fetch(&plan.id, plan.run_date()?).await?;
                self.ride(trip, plan).await
            }
            LegPlan::Walk(plan) => self.walk(plan).await,
        }
    }

    async fn ride(&mut self, trip: Arc<Leg>, plan: &TripLegPlan) -> Result<Segment, PlanError> {
        let segment = extract_segment(trip, &plan.board, &plan.alight)?;
        debug!(
            trip = segment.trip().identifier(),
            board = %segment.board_index(),
            alight = %segment.alight_index(),
            "extracted segment"
        );
        self.colour(segment, plan.colour.as_ref()).await
    }

    async fn walk(&mut self, plan: &WalkLegPlan) -> Result<Segment, PlanError> {
        let trip = self
            .walks
            .fetch_walk((&plan.from).into(), (&plan.to).into(), plan.depart_time()?)
            .await?;
        let board = trip.origin().identifier().into_owned();
        let alight = trip.destination().identifier().into_owned();
        let segment = extract_segment(Arc::new(Leg::Walk(trip)), &board, &alight)?;
        self.colour(segment, plan.colour.as_ref()).await
    }

    async fn colour(
        &mut self,
        segment: Segment,
        plan: Option<&ColourPlan>,
    ) -> Result<Segment, PlanError> {
        let explicit = plan.map(ColourPlan::parse).transpose()?.unwrap_or_default();
        let pair = match explicit.pair() {
            Some(pair) => pair,
            None => self.route_colours(segment.trip()).await?,
        };
        Ok(segment.with_colours(explicit.apply(pair)))
    }

    async fn route_colours(&mut self, leg: &Leg) -> Result<ColourPair, PlanError> {
        if let Some(pair) = leg.colour() {
            return Ok(pair);
        }
        match colour_request(leg) {
            Some(request) => {
                let resolution = self
                    .resolver
                    .resolve(&request.route_label, &request.key, &request.search_terms)
                    .await?;
                debug!(key = %request.key, source = ?resolution.source, "route colours");
                Ok(resolution.colours)
            }
            None => Ok(self.walk_colours),
        }
    }
}
