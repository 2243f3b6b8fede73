#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const LAT: f64 = 40.7128;
pub const LON: f64 = -74.006;
pub const POINT: &str = "40.7128,-74.0060";
pub const STATION: &str = "KNYC";

pub fn points_payload(base: &str) -> Value {
    json!({
        "properties": {
            "gridId": "OKX",
            "gridX": 33,
            "gridY": 35,
            "forecast": format!("{base}/gridpoints/OKX/33,35/forecast"),
            "forecastHourly": format!("{base}/gridpoints/OKX/33,35/forecast/hourly"),
            "observationStations": format!("{base}/gridpoints/OKX/33,35/stations"),
            "relativeLocation": {
                "properties": { "city": "New York", "state": "NY" }
            }
        }
    })
}

/// Alternating day/night periods from the morning of 2024-06-21.
pub fn forecast_payload(count: usize) -> Value {
    let periods = (0..count)
        .map(|idx| {
            let day = idx / 2;
            let is_daytime = idx % 2 == 0;
            let hour = if is_daytime { "06" } else { "18" };
            json!({
                "number": idx + 1,
                "name": if is_daytime { "Day" } else { "Night" },
                "startTime": format!("2024-06-{:02}T{hour}:00:00-04:00", 21 + day),
                "isDaytime": is_daytime,
                "temperature": if is_daytime { 80 + day } else { 62 + day },
                "temperatureUnit": "F",
                "shortForecast": if day == 1 { "Chance Showers" } else { "Sunny" },
                "probabilityOfPrecipitation": {
                    "unitCode": "wmoUnit:percent",
                    "value": if day == 1 { json!(40) } else { Value::Null }
                }
            })
        })
        .collect::<Vec<_>>();
    json!({ "properties": { "periods": periods } })
}

pub fn hourly_payload(count: usize) -> Value {
    let periods = (0..count)
        .map(|idx| {
            let hour = (10 + idx) % 24;
            let day = 21 + (10 + idx) / 24;
            json!({
                "number": idx + 1,
                "name": "",
                "startTime": format!("2024-06-{day:02}T{hour:02}:00:00-04:00"),
                "isDaytime": (6..18).contains(&hour),
                "temperature": 70 + (idx % 8),
                "shortForecast": "Mostly Sunny",
                "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 10 }
            })
        })
        .collect::<Vec<_>>();
    json!({ "properties": { "periods": periods } })
}

pub fn stations_payload(ids: &[&str]) -> Value {
    let features = ids
        .iter()
        .map(|id| json!({ "properties": { "stationIdentifier": id } }))
        .collect::<Vec<_>>();
    json!({ "features": features })
}

pub fn observation_payload() -> Value {
    json!({
        "properties": {
            "textDescription": "Mostly Cloudy",
            "timestamp": "2024-06-21T15:51:00+00:00",
            "temperature": { "unitCode": "wmoUnit:degC", "value": 22.2 },
            "dewpoint": { "unitCode": "wmoUnit:degC", "value": 13.9 },
            "windChill": { "unitCode": "wmoUnit:degC", "value": null },
            "heatIndex": { "unitCode": "wmoUnit:degC", "value": null },
            "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 59.4 },
            "windSpeed": { "unitCode": "wmoUnit:km_h-1", "value": 14.8 },
            "windDirection": { "unitCode": "wmoUnit:degree_(angle)", "value": 220 },
            "barometricPressure": { "unitCode": "wmoUnit:Pa", "value": 101320 },
            "visibility": { "unitCode": "wmoUnit:m", "value": 16090 }
        }
    })
}

pub fn alerts_payload() -> Value {
    json!({
        "features": [
            {
                "properties": {
                    "event": "Heat Advisory",
                    "headline": "Heat Advisory issued June 21",
                    "description": "Heat index values up to 103.",
                    "severity": "Moderate"
                }
            },
            {
                "properties": {
                    "event": "Severe Thunderstorm Warning",
                    "headline": "Severe Thunderstorm Warning until 5 PM",
                    "description": "",
                    "severity": "Severe"
                }
            }
        ]
    })
}

/// A mock NWS that answers every endpoint the dashboard fetch touches.
pub async fn mock_nws() -> MockServer {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_json(&server, &format!("/points/{POINT}"), points_payload(&base)).await;
    mount_json(&server, "/gridpoints/OKX/33,35/forecast", forecast_payload(14)).await;
    mount_json(
        &server,
        "/gridpoints/OKX/33,35/forecast/hourly",
        hourly_payload(48),
    )
    .await;
    mount_json(
        &server,
        "/gridpoints/OKX/33,35/stations",
        stations_payload(&[STATION, "KLGA"]),
    )
    .await;
    mount_json(
        &server,
        &format!("/stations/{STATION}/observations/latest"),
        observation_payload(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/alerts/active"))
        .and(query_param("point", POINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(alerts_payload()))
        .mount(&server)
        .await;

    server
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
