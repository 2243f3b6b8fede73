#![allow(clippy::cast_possible_truncation)]

use super::QuantitativeValue;

/// Shown wherever a reading is missing.
pub const PLACEHOLDER: &str = "—";

const CELSIUS_UNIT: &str = "wmoUnit:degC";
const METERS_PER_MILE: f64 = 1609.34;
const PASCALS_PER_INHG: f64 = 3386.39;
const MPH_PER_KPH: f64 = 0.621_371;

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

#[must_use]
pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

#[must_use]
pub fn pascals_to_inhg(pascals: f64) -> f64 {
    pascals / PASCALS_PER_INHG
}

#[must_use]
pub fn kph_to_mph(kph: f64) -> f64 {
    kph * MPH_PER_KPH
}

/// Rounded degrees Fahrenheit; Celsius readings are converted first.
#[must_use]
pub fn format_temperature(quantity: &QuantitativeValue) -> String {
    let Some(value) = quantity.value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };
    let fahrenheit = if quantity.unit() == Some(CELSIUS_UNIT) {
        to_fahrenheit(value)
    } else {
        value
    };
    format!("{}°", fahrenheit.round() as i64)
}

#[must_use]
pub fn format_humidity(percent: Option<f64>) -> String {
    percent
        .filter(|v| v.is_finite())
        .map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{}%", v.round() as i64))
}

#[must_use]
pub fn format_pressure(pascals: Option<f64>) -> String {
    pascals
        .filter(|v| v.is_finite())
        .map_or_else(
            || PLACEHOLDER.to_string(),
            |v| format!("{:.2} in", pascals_to_inhg(v)),
        )
}

#[must_use]
pub fn format_visibility(meters: Option<f64>) -> String {
    meters
        .filter(|v| v.is_finite())
        .map_or_else(
            || PLACEHOLDER.to_string(),
            |v| format!("{:.1} mi", meters_to_miles(v)),
        )
}

/// Speed in mph followed by the compass point, e.g. `"9 mph SW"`.
#[must_use]
pub fn format_wind(kph: Option<f64>, degrees: Option<f64>) -> String {
    let speed = kph
        .filter(|v| v.is_finite())
        .map_or_else(
            || PLACEHOLDER.to_string(),
            |v| format!("{} mph", kph_to_mph(v).round() as i64),
        );
    match degrees.and_then(compass_point) {
        Some(direction) => format!("{speed} {direction}"),
        None => speed,
    }
}

/// 16-point compass name for a bearing in degrees.
#[must_use]
pub fn compass_point(degrees: f64) -> Option<&'static str> {
    if !degrees.is_finite() {
        return None;
    }
    let sector = (degrees / 22.5).round().rem_euclid(16.0) as usize;
    COMPASS.get(sector).copied()
}
