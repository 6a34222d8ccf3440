//! Train services from the query API.

use std::future::Future;

use chrono::NaiveDate;
use serde::Deserialize;

use super::TripGateway;
use super::client::{ApiClient, dated_path};
use super::error::GatewayError;
use crate::domain::{
    Colour, ColourPair, Coordinates, Crs, Leg, TrainCall, TrainOperator, TrainService,
    TrainStation, TrainStop, TransitTime,
};

/// Operator as the API sends it. Colours are `#rrggbb` or absent.
#[derive(Debug, Clone, Deserialize)]
pub struct OperatorDto {
    pub name: String,
    pub atoc: String,
    pub fg: Option<String>,
    pub bg: Option<String>,
}

/// A station with its managing operator.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub name: String,
    pub crs: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub station: StationDto,
    pub platform: Option<String>,
    /// ISO-8601, empty or null when the train does not arrive
    pub plan_arr: Option<String>,
    /// ISO-8601, empty or null when the train does not depart
    pub plan_dep: Option<String>,
}

/// Response from `train/service/{id}/{yyyy}/{m}/{d}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDto {
    pub headcode: String,
    pub run_datetime: String,
    pub origins: Vec<StationDto>,
    pub destinations: Vec<StationDto>,
    pub stops: Vec<StopDto>,
    pub operator: OperatorDto,
}

fn convert_operator(dto: &OperatorDto) -> TrainOperator {
    let colour = |c: &Option<String>| c.as_deref().and_then(|s| Colour::parse_hex(s).ok());
    TrainOperator {
        name: dto.name.clone(),
        atoc: dto.atoc.clone(),
        colours: match (colour(&dto.bg), colour(&dto.fg)) {
            (Some(bg), Some(fg)) => Some(ColourPair::new(bg, fg)),
            _ => None,
        },
    }
}

fn convert_station(dto: &StationDto) -> Result<TrainStation, GatewayError> {
    Ok(TrainStation {
        name: dto.name.clone(),
        crs: Crs::parse(&dto.crs).map_err(|e| GatewayError::invalid(e.to_string()))?,
        coordinates: Coordinates::from_parts(dto.lat, dto.lon),
    })
}

fn optional_time(value: Option<&str>) -> Result<Option<TransitTime>, GatewayError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => TransitTime::parse_iso(s)
            .map(Some)
            .map_err(|e| GatewayError::invalid(e.to_string())),
    }
}

/// Convert an API response into a validated service.
pub fn convert_service(uid: &str, dto: &ServiceDto) -> Result<TrainService, GatewayError> {
    let run_datetime =
        TransitTime::parse_iso(&dto.run_datetime).map_err(|e| GatewayError::invalid(e.to_string()))?;

    let calls = dto
        .stops
        .iter()
        .map(|stop| {
            Ok(TrainCall {
                stop: TrainStop {
                    station: convert_station(&stop.station)?,
                    platform: stop.platform.clone().filter(|p| !p.is_empty()),
                },
                arrival: optional_time(stop.plan_arr.as_deref())?,
                departure: optional_time(stop.plan_dep.as_deref())?,
            })
        })
        .collect::<Result<Vec<_>, GatewayError>>()?;

    let origins = dto.origins.iter().map(convert_station).collect::<Result<_, _>>()?;
    let destinations = dto
        .destinations
        .iter()
        .map(convert_station)
        .collect::<Result<_, _>>()?;

    Ok(TrainService::new(
        uid,
        &dto.headcode,
        run_datetime,
        origins,
        destinations,
        calls,
        convert_operator(&dto.operator),
    )?)
}

/// Fetches train services by schedule UID.
#[derive(Debug, Clone)]
pub struct TrainGateway {
    client: ApiClient,
}

impl TrainGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl TripGateway for TrainGateway {
    fn fetch_trip(
        &self,
        id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Leg, GatewayError>> + Send {
        async move {
            let dto: ServiceDto = self
                .client
                .get_json(&dated_path("train/service", id, date))
                .await?;
            Ok(Leg::Train(convert_service(id, &dto)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SCHEME_CRS, Trip, identifier};

    const BODY: &str = r##"{
        "headcode": "1C07",
        "run_datetime": "2024-03-15T10:00:00+00:00",
        "origins": [{"name": "London Paddington", "crs": "PAD", "lat": 51.5165, "lon": -0.1771}],
        "destinations": [{"name": "Bristol Temple Meads", "crs": "BRI", "lat": null, "lon": null}],
        "stops": [
            {"station": {"name": "London Paddington", "crs": "PAD", "lat": 51.5165, "lon": -0.1771},
             "platform": "4", "plan_arr": null, "plan_dep": "2024-03-15T10:00:00"},
            {"station": {"name": "Reading", "crs": "RDG", "lat": 51.4589, "lon": -0.9718},
             "platform": "", "plan_arr": "2024-03-15T10:25:00", "plan_dep": "2024-03-15T10:27:00"},
            {"station": {"name": "Bristol Temple Meads", "crs": "BRI"},
             "platform": null, "plan_arr": "2024-03-15T11:30:00", "plan_dep": ""}
        ],
        "operator": {"name": "Great Western Railway", "atoc": "GW", "fg": "#FFFFFF", "bg": "#0A493E"}
    }"##;

    fn dto() -> ServiceDto {
        serde_json::from_str(BODY).unwrap()
    }

    #[test]
    fn converts_service() {
        let service = convert_service("P12345", &dto()).unwrap();
        assert_eq!(service.uid(), "P12345");
        assert_eq!(service.identifier(), "1C07");
        assert_eq!(service.name(), "1000 London Paddington to Bristol Temple Meads");
        assert_eq!(service.stop_count(), 3);

        let calls = service.calls();
        assert_eq!(calls[0].arrival, None);
        assert_eq!(calls[0].stop.platform.as_deref(), Some("4"));
        assert_eq!(calls[1].stop.platform, None);
        assert_eq!(calls[2].departure, None);
        assert_eq!(calls[2].arrival.unwrap().to_string(), "11:30");
        assert_eq!(identifier(&calls[1].stop, SCHEME_CRS).as_deref(), Some("RDG"));
        assert!(calls[2].stop.station.coordinates.is_none());
    }

    #[test]
    fn operator_colours() {
        let service = convert_service("P12345", &dto()).unwrap();
        assert_eq!(
            service.colour(),
            Some(ColourPair::new(Colour::rgb(0x0a, 0x49, 0x3e), Colour::WHITE))
        );

        let mut partial = dto();
        partial.operator.fg = None;
        let service = convert_service("P12345", &partial).unwrap();
        assert_eq!(service.colour(), None);
        assert_eq!(service.train_operator().atoc, "GW");
    }

    #[test]
    fn rejects_bad_crs_and_times() {
        let mut bad = dto();
        bad.stops[1].station.crs = "R1G".into();
        assert!(matches!(
            convert_service("X", &bad),
            Err(GatewayError::InvalidData { .. })
        ));

        let mut bad = dto();
        bad.stops[1].plan_arr = Some("10:25".into());
        assert!(matches!(
            convert_service("X", &bad),
            Err(GatewayError::InvalidData { .. })
        ));
    }

    #[test]
    fn rejects_empty_calling_pattern() {
        let mut empty = dto();
        empty.stops.clear();
        assert!(matches!(
            convert_service("X", &empty),
            Err(GatewayError::Domain(_))
        ));
    }
}
