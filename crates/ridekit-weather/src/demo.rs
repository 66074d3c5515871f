//! Demo weather: random but plausible conditions for trying the app
//! without a network connection or API subscription.

use rand::Rng;
use ridekit_engine::WeatherSummary;

fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Generate a random weather summary.
///
/// Temperatures span -10..35 °C, wind 5..40 km/h, rain probability the
/// full 0..1 range, so every band and modifier of the engine is
/// reachable in demo mode.
pub fn demo_summary() -> WeatherSummary {
    let mut rng = rand::thread_rng();

    let base_temp: f64 = rng.gen_range(-10.0..35.0);
    let temp_variation: f64 = rng.gen_range(2.0..5.0);
    let min_temp = base_temp;
    let max_temp = base_temp + temp_variation;

    // Feels-like runs a few degrees colder, more so in wind.
    let feels_like_offset: f64 = -rng.gen_range(1.0..5.0);
    let min_feels_like = min_temp + feels_like_offset;
    let max_feels_like = max_temp + feels_like_offset;

    let max_wind_speed: f64 = rng.gen_range(5.0..40.0);
    let max_rain_probability: f64 = rng.gen_range(0.0..1.0);
    let max_precipitation_intensity = if max_rain_probability > 0.3 {
        rng.gen_range(0.0..5.0)
    } else {
        0.0
    };

    WeatherSummary {
        min_temp: round_1dp(min_temp),
        max_temp: round_1dp(max_temp),
        min_feels_like: round_1dp(min_feels_like),
        max_feels_like: round_1dp(max_feels_like),
        max_wind_speed: round_1dp(max_wind_speed),
        max_rain_probability,
        max_precipitation_intensity: round_1dp(max_precipitation_intensity),
        hourly: None,
    }
}
