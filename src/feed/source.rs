//! Feed Source Module
//!
//! Upstream of live flight positions. [`AviationStackFeed`] talks to the
//! AviationStack REST API; tests substitute their own [`FeedSource`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::geo::{airport_coordinates, heading};
use super::types::{GeoPoint, LiveEntity};
use crate::error::{AtlasError, Result};

/// Records requested per snapshot
const SNAPSHOT_LIMIT: u32 = 100;

// == Feed Source Trait ==
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// All currently airborne flights that report a position.
    async fn fetch_active(&self) -> Result<Vec<LiveEntity>>;

    /// One flight by its flight number, if the feed knows it and it reports
    /// a position.
    async fn fetch_entity(&self, id: &str) -> Result<Option<LiveEntity>>;
}

// == AviationStack Feed ==
#[derive(Debug, Clone)]
pub struct AviationStackFeed {
    client: Client,
    api_url: String,
    api_key: String,
}

impl AviationStackFeed {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AtlasError::FeedUnavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn get_flights(&self, params: &[(&str, String)]) -> Result<Vec<RawFlight>> {
        let response = self
            .client
            .get(format!("{}/flights", self.api_url))
            .query(&[("access_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| AtlasError::FeedUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AtlasError::FeedUnavailable(format!(
                "feed returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: FeedResponse = response
            .json()
            .await
            .map_err(|e| AtlasError::FeedUnavailable(format!("invalid feed payload: {e}")))?;
        body.into_records()
    }
}

#[async_trait]
impl FeedSource for AviationStackFeed {
    #[instrument(skip(self))]
    async fn fetch_active(&self) -> Result<Vec<LiveEntity>> {
        let records = self
            .get_flights(&[
                ("limit", SNAPSHOT_LIMIT.to_string()),
                ("flight_status", "active".to_string()),
            ])
            .await?;
        debug!(records = records.len(), "Feed records received");
        Ok(transform_records(records))
    }

    #[instrument(skip(self))]
    async fn fetch_entity(&self, id: &str) -> Result<Option<LiveEntity>> {
        let records = self.get_flights(&[("flight_iata", id.to_string())]).await?;
        Ok(transform_records(records.into_iter().take(1).collect())
            .into_iter()
            .next())
    }
}

// == Wire Format ==
#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    data: Vec<RawFlight>,
    #[serde(default)]
    error: Option<Value>,
}

impl FeedResponse {
    /// An `error` object in a 200 response is still a failure.
    fn into_records(self) -> Result<Vec<RawFlight>> {
        match self.error {
            Some(error) => Err(AtlasError::FeedUnavailable(format!("feed error payload: {error}"))),
            None => Ok(self.data),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFlight {
    flight: Option<RawFlightCodes>,
    airline: Option<RawAirline>,
    departure: Option<RawAirport>,
    arrival: Option<RawAirport>,
    live: Option<RawLive>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFlightCodes {
    iata: Option<String>,
    icao: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAirline {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAirport {
    airport: Option<String>,
    iata: Option<String>,
    icao: Option<String>,
}

impl RawAirport {
    fn key(&self) -> String {
        self.airport
            .clone()
            .or_else(|| self.iata.clone())
            .or_else(|| self.icao.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn coordinates(&self) -> Option<GeoPoint> {
        self.iata.as_deref().and_then(airport_coordinates)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLive {
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude: Option<f64>,
    direction: Option<f64>,
    speed_horizontal: Option<f64>,
}

// == Transformation ==
/// Converts feed records to entities, dropping records without a position.
fn transform_records(records: Vec<RawFlight>) -> Vec<LiveEntity> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| transform_record(index, record))
        .collect()
}

fn transform_record(index: usize, record: RawFlight) -> Option<LiveEntity> {
    let live = record.live?;
    let position = GeoPoint::new(live.longitude?, live.latitude?);

    let codes = record.flight.unwrap_or_default();
    let departure = record.departure.unwrap_or_default();
    let arrival = record.arrival.unwrap_or_default();

    let label = codes
        .iata
        .or(codes.icao)
        .unwrap_or_else(|| format!("FL{index}"));

    let origin = departure.coordinates();
    let destination = arrival.coordinates();

    let bearing = match (live.direction, destination) {
        (Some(direction), _) => direction.rem_euclid(360.0),
        (None, Some(to)) => heading(position, to),
        (None, None) => 0.0,
    };

    let route_path: Vec<GeoPoint> = [origin, Some(position), destination]
        .into_iter()
        .flatten()
        .collect();

    Some(LiveEntity {
        id: label.clone(),
        label,
        airline: record
            .airline
            .and_then(|a| a.name)
            .unwrap_or_else(|| "Unknown Airline".to_string()),
        position,
        altitude: live.altitude.unwrap_or(0.0),
        speed: live.speed_horizontal.unwrap_or(0.0),
        heading: bearing,
        origin_key: departure.key(),
        destination_key: arrival.key(),
        route_path,
    })
}
