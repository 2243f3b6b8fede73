use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::domain::{alerts::Alert, forecast::ForecastPeriod};

mod conversions;

pub use conversions::{
    PLACEHOLDER, compass_point, format_humidity, format_pressure, format_temperature,
    format_visibility, format_wind, kph_to_mph, meters_to_miles, pascals_to_inhg, to_fahrenheit,
};


#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl Location {
    #[must_use]
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            latitude: lat,
            longitude: lon,
            city: None,
            state: None,
        }
    }

    #[must_use]
    pub fn with_place(mut self, city: Option<String>, state: Option<String>) -> Self {
        self.city = city;
        self.state = state;
        self
    }

    /// `"City, ST"` when the place is known, else the rounded coordinates.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.city, &self.state) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            _ => format!("{:.2}, {:.2}", self.latitude, self.longitude),
        }
    }
}

/// A measured value with its WMO unit code, e.g. `wmoUnit:degC`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit_code: Option<String>,
}

impl QuantitativeValue {
    #[must_use]
    pub fn new(value: Option<f64>, unit_code: &str) -> Self {
        Self {
            value,
            unit_code: Some(unit_code.to_string()),
        }
    }

    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit_code.as_deref()
    }
}

/// Latest station observation, in the units the station reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentObservation {
    pub station: String,
    pub text_description: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub temperature: QuantitativeValue,
    pub dewpoint: QuantitativeValue,
    pub wind_chill: QuantitativeValue,
    pub heat_index: QuantitativeValue,
    pub relative_humidity: QuantitativeValue,
    pub wind_speed: QuantitativeValue,
    pub wind_direction: QuantitativeValue,
    pub barometric_pressure: QuantitativeValue,
    pub visibility: QuantitativeValue,
}

impl CurrentObservation {
    #[must_use]
    pub fn temperature_label(&self) -> String {
        format_temperature(&self.temperature)
    }

    /// Wind chill when reported, else heat index, else nothing.
    #[must_use]
    pub fn feels_like_label(&self) -> Option<String> {
        [&self.wind_chill, &self.heat_index]
            .into_iter()
            .find(|q| q.value.is_some())
            .map(|q| {
                let unit = self.wind_chill.unit().or(self.heat_index.unit());
                format_temperature(&QuantitativeValue {
                    value: q.value,
                    unit_code: unit.map(str::to_string),
                })
            })
    }

    #[must_use]
    pub fn humidity_label(&self) -> String {
        format_humidity(self.relative_humidity.value)
    }

    #[must_use]
    pub fn dewpoint_label(&self) -> String {
        format_temperature(&self.dewpoint)
    }

    #[must_use]
    pub fn wind_label(&self) -> String {
        format_wind(self.wind_speed.value, self.wind_direction.value)
    }

    #[must_use]
    pub fn pressure_label(&self) -> String {
        format_pressure(self.barometric_pressure.value)
    }

    #[must_use]
    pub fn visibility_label(&self) -> String {
        format_visibility(self.visibility.value)
    }
}

/// Everything one refresh fetches for a location.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub location: Location,
    pub observation: CurrentObservation,
    pub forecast: Vec<ForecastPeriod>,
    pub hourly: Vec<ForecastPeriod>,
    pub alerts: Vec<Alert>,
    pub fetched_at: DateTime<Utc>,
}

impl Dashboard {
    /// UTC offset of the forecast office, taken from the published periods.
    #[must_use]
    pub fn local_offset(&self) -> Option<FixedOffset> {
        self.hourly
            .first()
            .or(self.forecast.first())
            .map(|p| *p.start_time.offset())
    }

    /// Today's high and low, only once the forecast has both halves of a day.
    #[must_use]
    pub fn high_low(&self) -> (Option<i32>, Option<i32>) {
        if self.forecast.len() < 2 {
            return (None, None);
        }
        crate::domain::forecast::today_high_low(&self.forecast)
    }
}

/// Daylight by wall clock, used for the current-conditions icon.
#[must_use]
pub fn is_daytime_hour(hour: u32) -> bool {
    (6..20).contains(&hour)
}
