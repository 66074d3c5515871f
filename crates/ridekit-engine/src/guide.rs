//! Scenario sweeps for the clothing guide view.
//!
//! The guide shows what each weather factor contributes on its own: it
//! sweeps one input across a fixed range, holds the others at a calm
//! baseline, and diffs each recommendation against the baseline to
//! isolate the items that factor added.

use chrono::DateTime;

use crate::engine::recommend;
use crate::types::{ClothingRecommendation, RideConfig, Units, WeatherSummary};

/// Temperatures (°C) swept for the temperature section of the guide.
pub const GUIDE_TEMPS_C: [f64; 10] = [25.0, 20.0, 16.0, 12.0, 8.0, 5.0, 2.0, -1.0, -3.0, -6.0];

/// Wind speeds (km/h) swept for the wind section.
pub const GUIDE_WINDS_KMH: [f64; 8] = [5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0];

/// Rain probabilities (0–1) swept for the rain section.
pub const GUIDE_RAIN_PROBS: [f64; 7] = [0.0, 0.2, 0.4, 0.5, 0.6, 0.8, 0.9];

/// Feels-like temperature held fixed while sweeping wind and rain.
const BASELINE_TEMP_C: f64 = 10.0;
/// Wind speed low enough that the wind rule never fires.
const BASELINE_WIND_KMH: f64 = 5.0;

/// One swept scenario and its full recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideScenario {
    /// Feels-like temperature in the sweep's unit system
    /// (°C for metric sweeps, °F for imperial)
    pub temp: f64,
    /// Wind speed (km/h)
    pub wind: f64,
    /// Rain probability (0–1)
    pub rain: f64,
    pub recommendation: ClothingRecommendation,
}

/// Items one factor contributed on top of the calm baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    /// The swept input value (km/h for wind, 0–1 for rain)
    pub value: f64,
    /// Accessories present with the factor but absent from the baseline
    pub added_accessories: Vec<String>,
    /// Explanations the factor added
    pub added_explanations: Vec<String>,
}

fn guide_config(units: Units) -> RideConfig {
    RideConfig {
        // Fixed start so sweeps are reproducible; the engine never reads it.
        start_time: DateTime::UNIX_EPOCH,
        duration_hours: 2.0,
        units,
    }
}

fn guide_summary(temp: f64, wind: f64, rain: f64) -> WeatherSummary {
    WeatherSummary {
        min_temp: temp,
        max_temp: temp + 2.0,
        min_feels_like: temp,
        max_feels_like: temp + 2.0,
        max_wind_speed: wind,
        max_rain_probability: rain,
        max_precipitation_intensity: 0.0,
        hourly: None,
    }
}

/// Order-preserving difference: items in `with` that `base` lacks.
pub fn added_items(base: &[String], with: &[String]) -> Vec<String> {
    with.iter()
        .filter(|item| !base.contains(item))
        .cloned()
        .collect()
}

/// Sweep the temperature ladder with low wind and no rain.
///
/// Guide sweeps always run in metric; `units` only affects how the caller
/// formats the scenario values.
pub fn temperature_scenarios(units: Units) -> Vec<GuideScenario> {
    let config = guide_config(units);
    GUIDE_TEMPS_C
        .iter()
        .map(|&temp| {
            let temp = temp_for_units(temp, units);
            GuideScenario {
                temp,
                wind: BASELINE_WIND_KMH,
                rain: 0.0,
                recommendation: recommend(&guide_summary(temp, BASELINE_WIND_KMH, 0.0), &config),
            }
        })
        .collect()
}

/// Sweep wind at a fixed cool temperature and isolate what wind adds.
///
/// Contributions that are identical to an already-seen one are dropped, so
/// the guide shows each distinct wind effect once.
pub fn wind_contributions(units: Units) -> Vec<FactorContribution> {
    let config = guide_config(units);
    let base = recommend(
        &guide_summary(BASELINE_TEMP_C, BASELINE_WIND_KMH, 0.0),
        &config,
    );

    let mut seen: Vec<Vec<String>> = Vec::new();
    let mut contributions = Vec::new();

    for &wind in &GUIDE_WINDS_KMH {
        let rec = recommend(&guide_summary(BASELINE_TEMP_C, wind, 0.0), &config);
        let added = added_items(&base.accessories, &rec.accessories);
        if added.is_empty() || seen.contains(&added) {
            continue;
        }
        let added_explanations = added_items(&base.explanation, &rec.explanation);
        seen.push(added.clone());
        contributions.push(FactorContribution {
            value: wind,
            added_accessories: added,
            added_explanations,
        });
    }

    contributions
}

/// Sweep rain probability at a fixed cool temperature and isolate what
/// rain adds. Shows each distinct rain tier once.
pub fn rain_contributions(units: Units) -> Vec<FactorContribution> {
    let config = guide_config(units);
    let base = recommend(
        &guide_summary(BASELINE_TEMP_C, BASELINE_WIND_KMH, 0.0),
        &config,
    );

    let mut seen: Vec<Vec<String>> = Vec::new();
    let mut contributions = Vec::new();

    for &rain in &GUIDE_RAIN_PROBS {
        let rec = recommend(&guide_summary(BASELINE_TEMP_C, BASELINE_WIND_KMH, rain), &config);
        let added = added_items(&base.accessories, &rec.accessories);
        if added.is_empty() || seen.contains(&added) {
            continue;
        }
        let added_explanations = added_items(&base.explanation, &rec.explanation);
        seen.push(added.clone());
        contributions.push(FactorContribution {
            value: rain,
            added_accessories: added,
            added_explanations,
        });
    }

    contributions
}

/// Scenario constants are authored in °C; imperial sweeps convert them to
/// °F so the engine's own conversion lands back on the intended value.
fn temp_for_units(temp_c: f64, units: Units) -> f64 {
    match units {
        Units::Metric => temp_c,
        Units::Imperial => crate::units::celsius_to_fahrenheit(temp_c),
    }
}
