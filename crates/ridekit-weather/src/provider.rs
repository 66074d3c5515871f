//! Forecast fetching against the weather middleware.
//!
//! The middleware holds the upstream API key and pre-filters hourly rows
//! to the requested ride window; this client only has to normalize units
//! and fold the rows into a `WeatherSummary`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use ridekit_engine::{HourlyWeather, RideConfig, Units, WeatherSummary};

use crate::cache::WeatherCache;
use crate::types::{ForecastResponse, Location, WeatherError};
use crate::units_query;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
}

impl WeatherProvider {
    /// Create a provider against the given middleware base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into(),
        })
    }

    /// Fetch the forecast for a ride window and summarize it.
    ///
    /// The returned summary is always metric, regardless of
    /// `config.units`; the unit preference only selects what the
    /// middleware is asked for.
    pub async fn fetch_summary(
        &self,
        location: &Location,
        config: &RideConfig,
    ) -> Result<WeatherSummary, WeatherError> {
        let units = units_query(config.units);
        let url = format!(
            "{}/api/weather/forecast?lat={}&lon={}&units={}&startTime={}&durationHours={}",
            self.base_url,
            location.lat,
            location.lon,
            units,
            config.start_time.timestamp(),
            config.duration_hours,
        );

        tracing::debug!(lat = location.lat, lon = location.lon, "Fetching forecast");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or_else(|| "Invalid API key or subscription required".to_string());
            return Err(WeatherError::InvalidApiKey(message));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let forecast: ForecastResponse = response.json().await?;
        summarize(&forecast, config.units)
    }

    /// Fetch with a read-through cache: return a fresh cached summary if
    /// one exists for this location and window, otherwise fetch and store.
    pub async fn fetch_summary_cached(
        &self,
        cache: &mut WeatherCache,
        location: &Location,
        config: &RideConfig,
    ) -> Result<WeatherSummary, WeatherError> {
        let key = WeatherCache::key(location, config);

        if let Some(summary) = cache.get_fresh(&key) {
            tracing::debug!(%key, "Weather cache hit");
            return Ok(summary);
        }

        let summary = self.fetch_summary(location, config).await?;
        if let Err(e) = cache.put(&key, &summary) {
            // A broken cache should never block a fetched result.
            tracing::warn!("Failed to store weather cache entry: {}", e);
        }
        Ok(summary)
    }
}

/// Fold hourly rows into metric extremes over the ride window.
fn summarize(forecast: &ForecastResponse, units: Units) -> Result<WeatherSummary, WeatherError> {
    if forecast.hourly.is_empty() {
        return Err(WeatherError::NoData);
    }

    let to_celsius = |t: f64| match units {
        Units::Metric => t,
        Units::Imperial => ridekit_engine::units::fahrenheit_to_celsius(t),
    };
    let to_kmh = |w: f64| match units {
        Units::Metric => w,
        Units::Imperial => ridekit_engine::units::mph_to_kmh(w),
    };

    let mut hourly = Vec::with_capacity(forecast.hourly.len());
    for hour in &forecast.hourly {
        let time = DateTime::<Utc>::from_timestamp(hour.dt, 0)
            .ok_or_else(|| WeatherError::Parse(format!("invalid timestamp {}", hour.dt)))?;
        hourly.push(HourlyWeather {
            time,
            temp: to_celsius(hour.temp),
            feels_like: to_celsius(hour.feels_like),
            wind_speed: to_kmh(hour.wind_speed),
            pop: hour.pop,
            rain_intensity: hour.rain.as_ref().map_or(0.0, |r| r.one_hour),
        });
    }

    let fold = |init: f64, f: fn(f64, f64) -> f64, get: fn(&HourlyWeather) -> f64| {
        hourly.iter().map(get).fold(init, f)
    };

    Ok(WeatherSummary {
        min_temp: fold(f64::INFINITY, f64::min, |h| h.temp),
        max_temp: fold(f64::NEG_INFINITY, f64::max, |h| h.temp),
        min_feels_like: fold(f64::INFINITY, f64::min, |h| h.feels_like),
        max_feels_like: fold(f64::NEG_INFINITY, f64::max, |h| h.feels_like),
        max_wind_speed: fold(f64::NEG_INFINITY, f64::max, |h| h.wind_speed),
        max_rain_probability: fold(f64::NEG_INFINITY, f64::max, |h| h.pop),
        max_precipitation_intensity: fold(f64::NEG_INFINITY, f64::max, |h| h.rain_intensity),
        hourly: Some(hourly),
    })
}
