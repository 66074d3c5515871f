//! Weather collaborator for RideKit
//!
//! Fetches ride-window forecasts from the weather middleware, geocodes
//! city names, caches summaries on disk, and can generate demo weather
//! for offline use. The recommendation engine itself lives in
//! `ridekit-engine`; this crate only produces its `WeatherSummary` input.

pub mod cache;
pub mod demo;
pub mod geocode;
pub mod provider;
pub mod types;

pub use cache::{WeatherCache, DEFAULT_CACHE_MINUTES};
pub use demo::demo_summary;
pub use geocode::{geocode_city, reverse_geocode};
pub use provider::WeatherProvider;
pub use types::*;

/// Query-string value for a unit preference.
pub fn units_query(units: ridekit_engine::Units) -> &'static str {
    match units {
        ridekit_engine::Units::Metric => "metric",
        ridekit_engine::Units::Imperial => "imperial",
    }
}
