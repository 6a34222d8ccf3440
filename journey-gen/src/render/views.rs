//! Askama templates and the view models they render.

use askama::Template;

use crate::domain::{
    DomainError, Journey, Mode, Segment, TransitTime, Trip, TripStop, destination_string,
    origin_string,
};

/// The generated page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub journeys: Vec<JourneyView>,
}

/// Journey view model for templates.
#[derive(Debug, Clone)]
pub struct JourneyView {
    pub name: String,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration_display: Option<String>,
    pub segments: Vec<SegmentView>,
}

impl JourneyView {
    /// Create from a domain Journey.
    pub fn from_journey(journey: &Journey) -> Result<Self, DomainError> {
        let segments = journey
            .segments
            .iter()
            .map(SegmentView::from_segment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: journey.name.clone(),
            departure_time: journey.departure().transpose()?.map(|t| t.to_string()),
            arrival_time: journey.arrival().transpose()?.map(|t| t.to_string()),
            duration_display: journey.duration_string()?,
            segments,
        })
    }
}

/// One ridden (or walked) segment.
#[derive(Debug, Clone)]
pub struct SegmentView {
    /// `bus`, `train` or `walk`; also the CSS class
    pub mode: &'static str,
    /// Service number, headcode, or "Walk"
    pub identifier: String,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub operator: Option<String>,
    pub url: Option<String>,
    pub board: StopView,
    pub alight: StopView,
    pub intermediate: Vec<StopView>,
    pub duration_display: String,
    pub foreground: String,
    pub background: String,
    pub border: String,
}

impl SegmentView {
    /// Create from a domain Segment.
    pub fn from_segment(segment: &Segment) -> Result<Self, DomainError> {
        let trip = segment.trip();
        let colours = segment.colours();
        let mode = trip.mode();

        Ok(Self {
            mode: mode.as_str(),
            identifier: trip.identifier().to_string(),
            name: trip.name(),
            origin: origin_string(&**trip),
            destination: destination_string(&**trip),
            operator: trip.operator().map(str::to_string),
            url: trip.url(),
            board: StopView::new(segment.board_stop(), Some(segment.board_time()?)),
            alight: StopView::new(segment.alight_stop(), Some(segment.alight_time()?)),
            intermediate: match mode {
                Mode::Walk => Vec::new(),
                _ => segment
                    .intermediate_stops()
                    .map(|s| StopView::new(s, s.departure().or(s.arrival())))
                    .collect(),
            },
            duration_display: segment.duration_string()?,
            foreground: colours.foreground.to_string(),
            background: colours.background.to_string(),
            border: colours.border.to_string(),
        })
    }
}

/// A stop as shown on the page.
#[derive(Debug, Clone)]
pub struct StopView {
    pub name: String,
    /// Platform, bay or indicator
    pub label: Option<String>,
    /// "HH:MM", empty when the stop is untimed
    pub time: String,
    pub url: String,
}

impl StopView {
    fn new(call: &dyn TripStop, time: Option<TransitTime>) -> Self {
        let stop = call.stop();
        Self {
            name: stop.name().into_owned(),
            label: stop.location_label().map(str::to_string),
            time: time.map(|t| t.to_string()).unwrap_or_default(),
            url: call.url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Colour, ColourPair, Leg, SegmentColours, bus, extract_segment, train, walk};

    fn rail_segment() -> Segment {
        let leg = Arc::new(Leg::from(train::fixtures::service()));
        extract_segment(leg, "PAD", "SWI")
            .unwrap()
            .with_colours(SegmentColours::from_pair(ColourPair::new(
                Colour::rgb(0x0a, 0x49, 0x3e),
                Colour::WHITE,
            )))
    }

    #[test]
    fn train_segment_view() {
        let view = SegmentView::from_segment(&rail_segment()).unwrap();
        assert_eq!(view.mode, "train");
        assert_eq!(view.identifier, "1C07");
        assert_eq!(view.board.name, "London Paddington");
        assert_eq!(view.board.time, "10:00");
        assert_eq!(view.alight.time, "10:52");
        assert_eq!(view.intermediate.len(), 1);
        assert_eq!(view.intermediate[0].time, "10:27");
        assert_eq!(view.duration_display, "52m");
        assert_eq!(view.background, "#0a493e");
        assert_eq!(view.border, "#0a493e");
        assert_eq!(view.operator.as_deref(), Some("Great Western Railway"));
        assert!(view.url.unwrap().contains("gb-nr:P12345"));
    }

    #[test]
    fn walk_segment_view() {
        let leg = Arc::new(Leg::from(walk::fixtures::walk()));
        let board = leg.stop_at(0).unwrap().identifier().into_owned();
        let alight = leg.stop_at(1).unwrap().identifier().into_owned();
        let segment = extract_segment(leg, &board, &alight).unwrap();

        let view = SegmentView::from_segment(&segment).unwrap();
        assert_eq!(view.mode, "walk");
        assert_eq!(view.identifier, "Walk");
        assert!(view.intermediate.is_empty());
        assert_eq!(view.duration_display, "18m");
    }

    #[test]
    fn journey_view() {
        let bus = Arc::new(Leg::from(bus::fixtures::trip()));
        let journey = Journey::new(
            "Day out",
            vec![
                rail_segment(),
                extract_segment(bus, "0100BRA10001", "0180BAC30001").unwrap(),
            ],
        );
        let view = JourneyView::from_journey(&journey).unwrap();
        assert_eq!(view.departure_time.as_deref(), Some("10:00"));
        assert_eq!(view.arrival_time.as_deref(), Some("10:55"));
        assert_eq!(view.duration_display.as_deref(), Some("55m"));
        assert_eq!(view.segments[1].identifier, "X39");
        assert_eq!(view.segments[1].intermediate[0].name, "Keynsham");
    }
}
