//! Bus trips from the query API.

use std::future::Future;

use chrono::NaiveDate;
use serde::Deserialize;

use super::TripGateway;
use super::client::{ApiClient, dated_path};
use super::error::GatewayError;
use crate::domain::{
    AtcoCode, BusService, BusStop, BusTrip, BusTripStop, Colour, ColourPair, Coordinates, Leg,
    parse_time_sequence,
};

#[derive(Debug, Clone, Deserialize)]
pub struct BusStopDto {
    pub atco: String,
    pub naptan: Option<String>,
    pub name: String,
    pub locality: Option<String>,
    pub parent: Option<String>,
    pub street: Option<String>,
    pub indicator: Option<String>,
    pub bearing: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// A call with "HH:MM" times relative to the trip date.
#[derive(Debug, Clone, Deserialize)]
pub struct BusCallDto {
    pub stop: BusStopDto,
    pub arr: Option<String>,
    pub dep: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColourDto {
    pub fg: String,
    pub bg: String,
}

/// Response from `bus/trip/{id}/{yyyy}/{m}/{d}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BusTripDto {
    pub id: u64,
    pub number: String,
    pub slug: String,
    pub origin: String,
    pub destination: String,
    pub operator: String,
    pub colour: Option<ColourDto>,
    pub stops: Vec<BusCallDto>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn convert_stop(dto: &BusStopDto) -> Result<BusStop, GatewayError> {
    let atco = AtcoCode::parse(&dto.atco).map_err(|e| GatewayError::invalid(e.to_string()))?;
    let mut stop = BusStop::new(atco, dto.name.trim());
    stop.naptan = non_empty(&dto.naptan);
    stop.locality = non_empty(&dto.locality);
    stop.parent_locality = non_empty(&dto.parent);
    stop.street = non_empty(&dto.street);
    stop.indicator = non_empty(&dto.indicator);
    stop.bearing = non_empty(&dto.bearing);
    stop.coordinates = Coordinates::from_parts(dto.lat, dto.lon);
    Ok(stop)
}

fn convert_colour(dto: &ColourDto) -> Option<ColourPair> {
    let bg = Colour::parse_hex(&dto.bg).ok()?;
    let fg = Colour::parse_hex(&dto.fg).ok()?;
    Some(ColourPair::new(bg, fg))
}

/// Convert an API response into a validated trip.
///
/// Times are read in calling order so a trip running past midnight gets
/// the right dates. A stop with only one time uses it for both arrival
/// and departure.
pub fn convert_trip(dto: &BusTripDto, date: NaiveDate) -> Result<BusTrip, GatewayError> {
    let raw: Vec<Option<&str>> = dto
        .stops
        .iter()
        .flat_map(|c| [c.arr.as_deref(), c.dep.as_deref()])
        .map(|t| t.map(str::trim).filter(|s| !s.is_empty()))
        .collect();
    let times = parse_time_sequence(&raw, date).map_err(|e| GatewayError::invalid(e.to_string()))?;

    let stops = dto
        .stops
        .iter()
        .zip(times.chunks(2))
        .map(|(call, t)| {
            let (arr, dep) = (t[0], t[1]);
            Ok(BusTripStop {
                stop: convert_stop(&call.stop)?,
                arrival: arr.or(dep),
                departure: dep.or(arr),
            })
        })
        .collect::<Result<Vec<_>, GatewayError>>()?;

    let service = BusService {
        number: dto.number.trim().to_string(),
        slug: dto.slug.clone(),
        origin: dto.origin.clone(),
        destination: dto.destination.clone(),
        operator: dto.operator.clone(),
        colour: dto.colour.as_ref().and_then(convert_colour),
    };

    Ok(BusTrip::new(dto.id, service, stops)?)
}

/// Fetches bus trips by trip id.
#[derive(Debug, Clone)]
pub struct BusGateway {
    client: ApiClient,
}

impl BusGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl TripGateway for BusGateway {
    fn fetch_trip(
        &self,
        id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Leg, GatewayError>> + Send {
        async move {
            let dto: BusTripDto = self.client.get_json(&dated_path("bus/trip", id, date)).await?;
            Ok(Leg::Bus(convert_trip(&dto, date)?))
        }
    }
}
