use serde::{Deserialize, Serialize};

/// Geographic location, optionally resolved to a place name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub city: Option<String>,
}

/// One hourly entry as returned by the forecast middleware.
///
/// Field names follow the upstream One Call shape; values are in the
/// unit system that was requested.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastHour {
    /// Unix timestamp (seconds)
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub wind_speed: f64,
    /// Probability of precipitation, 0–1
    pub pop: f64,
    #[serde(default)]
    pub rain: Option<RainVolume>,
}

/// Rain volume for the preceding hour.
#[derive(Debug, Clone, Deserialize)]
pub struct RainVolume {
    #[serde(rename = "1h")]
    pub one_hour: f64,
}

/// Forecast response: hourly rows already filtered to the ride window
/// by the middleware.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub hourly: Vec<ForecastHour>,
}

/// Geocoding response entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub lat: f64,
    pub lon: f64,
    pub name: Option<String>,
}

/// Weather collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid API key or subscription required: {0}")]
    InvalidApiKey(String),
    #[error("Weather API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("No weather data available for ride window")]
    NoData,
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Cache error: {0}")]
    Cache(String),
}
