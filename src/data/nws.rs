use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{
    alerts::Alert,
    forecast::ForecastPeriod,
    weather::{CurrentObservation, Dashboard, Location, QuantitativeValue},
};

const NWS_URL: &str = "https://api.weather.gov";
const USER_AGENT: &str = "(skycast, github.com/skycast)";
const ACCEPT: &str = "application/geo+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum NwsError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("{endpoint} request failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error {status}: {url}")]
    Status { status: StatusCode, url: String },

    #[error("failed to parse {endpoint} payload: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("No observation stations found")]
    NoStations,
}

pub type Result<T> = std::result::Result<T, NwsError>;

/// Forecast office grid cell covering a coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPoint {
    pub forecast_url: String,
    pub forecast_hourly_url: String,
    pub observation_stations_url: String,
    pub grid_id: String,
    pub grid_x: i64,
    pub grid_y: i64,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

impl NwsClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(NWS_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(NwsError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str, url: &str) -> Result<T> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| NwsError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NwsError::Status {
                status,
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| NwsError::Decode { endpoint, source })
    }

    pub async fn points(&self, lat: f64, lon: f64) -> Result<GridPoint> {
        let url = format!("{}/points/{lat:.4},{lon:.4}", self.base_url);
        let payload: PointsResponse = self.get_json("points", &url).await?;
        let props = payload.properties;
        let place = props.relative_location.map(|r| r.properties);
        Ok(GridPoint {
            forecast_url: props.forecast,
            forecast_hourly_url: props.forecast_hourly,
            observation_stations_url: props.observation_stations,
            grid_id: props.grid_id,
            grid_x: props.grid_x,
            grid_y: props.grid_y,
            city: place.as_ref().and_then(|p| p.city.clone()),
            state: place.and_then(|p| p.state),
        })
    }

    pub async fn forecast(&self, url: &str) -> Result<Vec<ForecastPeriod>> {
        let payload: ForecastResponse = self.get_json("forecast", url).await?;
        Ok(parse_periods(payload.properties.periods))
    }

    pub async fn hourly_forecast(&self, url: &str) -> Result<Vec<ForecastPeriod>> {
        let payload: ForecastResponse = self.get_json("hourly forecast", url).await?;
        Ok(parse_periods(payload.properties.periods))
    }

    /// Identifier of the nearest observation station.
    pub async fn observation_station(&self, url: &str) -> Result<String> {
        let payload: StationsResponse = self.get_json("stations", url).await?;
        payload
            .features
            .into_iter()
            .next()
            .map(|f| f.properties.station_identifier)
            .ok_or(NwsError::NoStations)
    }

    pub async fn latest_observation(&self, station: &str) -> Result<CurrentObservation> {
        let url = format!("{}/stations/{station}/observations/latest", self.base_url);
        let payload: ObservationResponse = self.get_json("observation", &url).await?;
        Ok(payload.properties.into_observation(station))
    }

    pub async fn alerts(&self, lat: f64, lon: f64) -> Result<Vec<Alert>> {
        let url = format!("{}/alerts/active?point={lat:.4},{lon:.4}", self.base_url);
        let payload: AlertsResponse = self.get_json("alerts", &url).await?;
        Ok(payload
            .features
            .into_iter()
            .map(|f| {
                let p = f.properties;
                Alert::new(p.event, p.headline, p.description, p.severity.as_deref())
            })
            .collect())
    }

    /// Everything the dashboard shows for one location: the grid lookup,
    /// then forecasts, station and alerts concurrently, then the observation.
    pub async fn fetch_dashboard(&self, location: Location) -> Result<Dashboard> {
        let grid = self.points(location.latitude, location.longitude).await?;
        let location = location.with_place(grid.city.clone(), grid.state.clone());

        let (forecast, hourly, station, alerts) = tokio::try_join!(
            self.forecast(&grid.forecast_url),
            self.hourly_forecast(&grid.forecast_hourly_url),
            self.observation_station(&grid.observation_stations_url),
            self.alerts(location.latitude, location.longitude),
        )?;

        let observation = self.latest_observation(&station).await?;
        log::info!(
            "fetched {} periods, {} hourly, {} alerts for {} via {}",
            forecast.len(),
            hourly.len(),
            alerts.len(),
            location.display_name(),
            station
        );

        Ok(Dashboard {
            location,
            observation,
            forecast,
            hourly,
            alerts,
            fetched_at: Utc::now(),
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_periods(periods: Vec<ApiPeriod>) -> Vec<ForecastPeriod> {
    let mut out = Vec::with_capacity(periods.len());
    for period in periods {
        let Ok(start_time) = DateTime::parse_from_rfc3339(&period.start_time) else {
            log::warn!("skipping period with bad start time {:?}", period.start_time);
            continue;
        };
        out.push(ForecastPeriod {
            name: period.name,
            start_time,
            is_daytime: period.is_daytime,
            temperature: period.temperature.round() as i32,
            short_forecast: period.short_forecast,
            precipitation_chance: period
                .probability_of_precipitation
                .and_then(|p| p.value)
                .filter(|v| v.is_finite())
                .map(|v| v.round().clamp(0.0, 100.0) as u8),
        });
    }
    out
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    forecast: String,
    forecast_hourly: String,
    observation_stations: String,
    #[serde(default)]
    grid_id: String,
    #[serde(default)]
    grid_x: i64,
    #[serde(default)]
    grid_y: i64,
    relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize)]
struct RelativeLocation {
    properties: RelativeLocationProperties,
}

#[derive(Debug, Deserialize)]
struct RelativeLocationProperties {
    city: Option<String>,
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ApiPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPeriod {
    #[serde(default)]
    name: String,
    start_time: String,
    is_daytime: bool,
    temperature: f64,
    #[serde(default)]
    short_forecast: String,
    probability_of_precipitation: Option<QuantitativeValue>,
}

#[derive(Debug, Deserialize)]
struct StationsResponse {
    #[serde(default)]
    features: Vec<StationFeature>,
}

#[derive(Debug, Deserialize)]
struct StationFeature {
    properties: StationProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationProperties {
    station_identifier: String,
}

#[derive(Debug, Deserialize)]
struct ObservationResponse {
    properties: ObservationProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ObservationProperties {
    text_description: Option<String>,
    timestamp: Option<String>,
    temperature: QuantitativeValue,
    dewpoint: QuantitativeValue,
    wind_chill: QuantitativeValue,
    heat_index: QuantitativeValue,
    relative_humidity: QuantitativeValue,
    wind_speed: QuantitativeValue,
    wind_direction: QuantitativeValue,
    barometric_pressure: QuantitativeValue,
    visibility: QuantitativeValue,
}

impl ObservationProperties {
    fn into_observation(self, station: &str) -> CurrentObservation {
        CurrentObservation {
            station: station.to_string(),
            text_description: self.text_description.unwrap_or_default(),
            timestamp: self
                .timestamp
                .and_then(|t| DateTime::parse_from_rfc3339(&t).ok())
                .map(|t| t.with_timezone(&Utc)),
            temperature: self.temperature,
            dewpoint: self.dewpoint,
            wind_chill: self.wind_chill,
            heat_index: self.heat_index,
            relative_humidity: self.relative_humidity,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            barometric_pressure: self.barometric_pressure,
            visibility: self.visibility,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
struct AlertFeature {
    properties: AlertProperties,
}

#[derive(Debug, Deserialize)]
struct AlertProperties {
    event: Option<String>,
    headline: Option<String>,
    description: Option<String>,
    severity: Option<String>,
}
