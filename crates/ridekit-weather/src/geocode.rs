//! Geocoding through the weather middleware: city name to coordinates,
//! and coordinates back to a place name for display.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::types::{GeocodeResponse, Location, WeatherError};

const REQUEST_TIMEOUT_SECS: u64 = 10;

fn client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
}

/// Round to one decimal place (~11 km), the precision weather is cached at.
fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places (~1.1 km), precise enough to name the
/// right town.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Resolve a city name to coordinates.
///
/// Coordinates are rounded to one decimal place so equal city lookups
/// land on the same weather cache entry.
pub async fn geocode_city(base_url: &str, city: &str) -> Result<Location, WeatherError> {
    let encoded: String = url::form_urlencoded::byte_serialize(city.as_bytes()).collect();
    let url = format!("{base_url}/api/weather/geocode?city={encoded}");

    let response = client()?.get(&url).send().await?;
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| format!("Geocoding API error ({status})"));
        return Err(WeatherError::Api { status, message });
    }

    let body: Option<GeocodeResponse> = response.json().await?;
    let found = body.ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;

    Ok(Location {
        lat: round_1dp(found.lat),
        lon: round_1dp(found.lon),
        city: found.name,
    })
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    name: Option<String>,
}

/// Reverse geocode coordinates to a place name.
///
/// Returns `None` on any failure; the caller falls back to showing raw
/// coordinates.
pub async fn reverse_geocode(base_url: &str, lat: f64, lon: f64) -> Option<String> {
    let lat = round_2dp(lat);
    let lon = round_2dp(lon);

    let client = match client() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to create geocoding client: {}", e);
            return None;
        }
    };

    let url = format!("{base_url}/api/weather/reverse-geocode?lat={lat}&lon={lon}");
    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Reverse geocode request failed: {}", e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("Reverse geocode returned status {}", response.status());
        return None;
    }

    let body: ReverseGeocodeResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("Reverse geocode parse error: {}", e);
            return None;
        }
    };

    if let Some(name) = &body.name {
        tracing::info!("Reverse geocoded to: {}", name);
    }
    body.name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(round_1dp(47.6062), 47.6);
        assert_eq!(round_2dp(47.6062), 47.61);
        assert_eq!(round_1dp(-122.3321), -122.3);
    }
}
