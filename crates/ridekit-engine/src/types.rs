use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit system preference
///
/// Display/input unit only. All threshold reasoning inside the engine is
/// metric; imperial inputs are converted before any comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

/// One hour of forecast data, normalized to metric.
///
/// Carried alongside a [`WeatherSummary`] for charts and detail views.
/// The recommendation engine never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeather {
    pub time: DateTime<Utc>,
    /// Air temperature in °C
    pub temp: f64,
    /// Apparent temperature in °C
    pub feels_like: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Probability of precipitation, 0–1
    pub pop: f64,
    /// Precipitation intensity in mm/h
    pub rain_intensity: f64,
}

/// Weather extremes over a ride window.
///
/// This is a worst-case summary, not a time series: each field is the
/// min or max over every forecast hour the ride touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// Minimum air temperature (°C, or °F when paired with imperial input)
    pub min_temp: f64,
    /// Maximum air temperature
    pub max_temp: f64,
    /// Minimum apparent temperature — the primary classification driver
    pub min_feels_like: f64,
    /// Maximum apparent temperature
    pub max_feels_like: f64,
    /// Maximum wind speed (km/h, or mph when imperial)
    pub max_wind_speed: f64,
    /// Maximum probability of precipitation, 0–1
    pub max_rain_probability: f64,
    /// Maximum precipitation intensity (mm/h)
    pub max_precipitation_intensity: f64,
    /// Optional hourly series for charts; not consumed by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly: Option<Vec<HourlyWeather>>,
}

/// Parameters of the planned ride.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideConfig {
    pub start_time: DateTime<Utc>,
    /// Ride length in hours; positive
    pub duration_hours: f64,
    /// Unit system the weather fields are expressed in
    pub units: Units,
}

/// Engine output: clothing split into the main kit and add-on accessories,
/// with one explanation line per rule that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingRecommendation {
    /// Core garments chosen by the temperature band
    pub main_kit: Vec<String>,
    /// Additive items from the band plus wind/rain modifiers
    pub accessories: Vec<String>,
    /// Human-readable reasons, in rule-evaluation order
    pub explanation: Vec<String>,
}
