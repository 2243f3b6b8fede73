use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::Location;

const GEOIP_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
    region_code: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Approximate location from the caller's public IP. `None` on any failure;
/// the caller falls back to asking for `--lat`/`--lon`.
pub async fn detect_location() -> Option<Location> {
    detect_location_from(GEOIP_URL).await
}

pub async fn detect_location_from(url: &str) -> Option<Location> {
    let client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .ok()?;
    let response: IpApiResponse = match client.get(url).send().await {
        Ok(resp) => resp.error_for_status().ok()?.json().await.ok()?,
        Err(err) => {
            log::warn!("ip geolocation failed: {err}");
            return None;
        }
    };
    let latitude = response.latitude.filter(|v| v.is_finite())?;
    let longitude = response.longitude.filter(|v| v.is_finite())?;
    Some(
        Location::from_coords(latitude, longitude).with_place(
            response.city.filter(|c| !c.is_empty()),
            response.region_code.filter(|r| !r.is_empty()),
        ),
    )
}
