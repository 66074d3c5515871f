//! The recommendation rules: a temperature-band ladder plus additive
//! wind and rain modifiers.

use crate::types::{ClothingRecommendation, RideConfig, Units, WeatherSummary};
use crate::units::{fahrenheit_to_celsius, mph_to_kmh};

/// Wind speed (km/h) above which wind protection is added.
pub const WIND_THRESHOLD_KMH: f64 = 20.0;

/// Rain probability (%) above which heavy-rain protection is considered.
pub const HEAVY_RAIN_PROBABILITY_PCT: f64 = 70.0;

/// Rain probability (%) above which a rain jacket is suggested.
pub const RAIN_PROBABILITY_PCT: f64 = 40.0;

/// Feels-like temperature (°C) below which heavy rain warrants a
/// waterproof rather than a packable rain jacket.
pub const HEAVY_RAIN_TEMP_C: f64 = 15.0;

/// Start temperature (°C) below which removable layers are suggested.
pub const COLD_START_TEMP_C: f64 = 10.0;

/// Recommend clothing for a ride given the weather extremes over its window.
///
/// Pure and deterministic: identical inputs always produce an identical
/// recommendation, including ordering. Explanations are appended in rule
/// order — temperature band, wind, rain, cold-start advisory — and the
/// temperature band always contributes at least one entry.
///
/// Imperial inputs (per `config.units`) are converted to metric before any
/// threshold comparison; the thresholds themselves never change.
///
/// Non-finite inputs do not panic: a NaN feels-like falls through the
/// ladder into the coldest band, and every modifier comparison against
/// NaN is false, so no modifier fires.
pub fn recommend(weather: &WeatherSummary, config: &RideConfig) -> ClothingRecommendation {
    let is_metric = config.units == Units::Metric;

    let temp = if is_metric {
        weather.min_feels_like
    } else {
        fahrenheit_to_celsius(weather.min_feels_like)
    };
    let wind = if is_metric {
        weather.max_wind_speed
    } else {
        mph_to_kmh(weather.max_wind_speed)
    };
    let start_temp = if is_metric {
        weather.min_temp
    } else {
        fahrenheit_to_celsius(weather.min_temp)
    };

    let mut main_kit: Vec<String> = Vec::new();
    let mut accessories: Vec<String> = Vec::new();
    let mut explanation: Vec<String> = Vec::new();

    let mut push_kit = |item: &str| main_kit.push(item.to_string());

    // Temperature ladder on minimum feels-like. First match wins; boundary
    // values belong to the warmer band. The final else arm keeps the ladder
    // total over all inputs, NaN included.
    if temp > 22.0 {
        push_kit("Short bib");
        push_kit("Summer jersey");
        explanation.push("Warm conditions - lightweight kit".to_string());
    } else if temp >= 18.0 {
        push_kit("Short bib");
        push_kit("Jersey");
        accessories.push("Optional arm warmers".to_string());
        explanation.push("Moderate warmth - arm warmers optional".to_string());
    } else if temp >= 14.0 {
        push_kit("Short bib");
        push_kit("Jersey");
        accessories.push("Arm warmers".to_string());
        explanation.push("Cool conditions - arm warmers recommended".to_string());
    } else if temp >= 10.0 {
        push_kit("Short bib");
        push_kit("Long sleeve jersey OR arm warmers");
        accessories.push("Light vest".to_string());
        explanation.push("Cool conditions - long sleeves or arm warmers with vest".to_string());
    } else if temp >= 6.0 {
        push_kit("Short bib");
        push_kit("Thermal jersey");
        accessories.push("Jacket".to_string());
        explanation.push("Cold conditions - thermal layers and jacket".to_string());
    } else {
        push_kit("Winter jacket");
        push_kit("Full protection");
        explanation.push("Very cold conditions - full winter protection".to_string());
    }

    // Wind modifier: additive, never replaces the base kit.
    if wind > WIND_THRESHOLD_KMH {
        accessories.push("Wind vest".to_string());
        explanation.push("High wind conditions - wind protection needed".to_string());
    }

    // Rain modifiers: the heavy tier wins outright, never both.
    let rain_prob_pct = weather.max_rain_probability * 100.0;
    if rain_prob_pct > HEAVY_RAIN_PROBABILITY_PCT && temp < HEAVY_RAIN_TEMP_C {
        accessories.push("Waterproof jacket".to_string());
        explanation.push("Heavy rain expected - waterproof protection essential".to_string());
    } else if rain_prob_pct > RAIN_PROBABILITY_PCT {
        accessories.push("Rain jacket".to_string());
        explanation.push("Rain likely - rain protection recommended".to_string());
    }

    // Advisory only: adds no garment.
    if start_temp < COLD_START_TEMP_C {
        explanation.push(
            "Start temperature is cold - consider removable layers for warming up".to_string(),
        );
    }

    ClothingRecommendation {
        main_kit,
        accessories,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{celsius_to_fahrenheit, kmh_to_mph};
    use chrono::{TimeZone, Utc};

    fn config(units: Units) -> RideConfig {
        RideConfig {
            start_time: Utc.with_ymd_and_hms(2026, 8, 30, 7, 0, 0).unwrap(),
            duration_hours: 2.0,
            units,
        }
    }

    fn summary(feels_like: f64, wind: f64, rain_prob: f64) -> WeatherSummary {
        WeatherSummary {
            min_temp: feels_like,
            max_temp: feels_like + 2.0,
            min_feels_like: feels_like,
            max_feels_like: feels_like + 2.0,
            max_wind_speed: wind,
            max_rain_probability: rain_prob,
            max_precipitation_intensity: 0.0,
            hourly: None,
        }
    }

    /// Number of explanation entries contributed by the temperature ladder.
    fn band_explanations(rec: &ClothingRecommendation) -> usize {
        let bands = [
            "Warm conditions - lightweight kit",
            "Moderate warmth - arm warmers optional",
            "Cool conditions - arm warmers recommended",
            "Cool conditions - long sleeves or arm warmers with vest",
            "Cold conditions - thermal layers and jacket",
            "Very cold conditions - full winter protection",
        ];
        rec.explanation
            .iter()
            .filter(|e| bands.contains(&e.as_str()))
            .count()
    }

    #[test]
    fn test_warm_conditions_lightweight_kit() {
        let rec = recommend(&summary(25.0, 10.0, 0.0), &config(Units::Metric));

        assert_eq!(rec.main_kit, vec!["Short bib", "Summer jersey"]);
        assert!(rec.accessories.is_empty());
        assert_eq!(rec.explanation, vec!["Warm conditions - lightweight kit"]);
    }

    #[test]
    fn test_cold_band_thermal_and_jacket() {
        // Feels-like 8 but air temperature 10: the band fires without the
        // cold-start advisory.
        let mut weather = summary(8.0, 10.0, 0.0);
        weather.min_temp = 10.0;
        weather.max_temp = 12.0;
        let rec = recommend(&weather, &config(Units::Metric));

        assert_eq!(rec.main_kit, vec!["Short bib", "Thermal jersey"]);
        assert_eq!(rec.accessories, vec!["Jacket"]);
        assert_eq!(
            rec.explanation,
            vec!["Cold conditions - thermal layers and jacket"]
        );
    }

    #[test]
    fn test_cold_start_advisory_adds_text_only() {
        let rec = recommend(&summary(8.0, 10.0, 0.0), &config(Units::Metric));

        // min_temp below 10 appends the advisory but no garment.
        assert_eq!(rec.accessories, vec!["Jacket"]);
        assert_eq!(rec.explanation.len(), 2);
        assert!(rec.explanation[1].contains("removable layers"));
    }

    #[test]
    fn test_wind_appends_after_temperature() {
        let rec = recommend(&summary(10.0, 25.0, 0.0), &config(Units::Metric));

        assert_eq!(
            rec.main_kit,
            vec!["Short bib", "Long sleeve jersey OR arm warmers"]
        );
        assert!(rec.accessories.contains(&"Wind vest".to_string()));
        assert_eq!(
            rec.explanation[0],
            "Cool conditions - long sleeves or arm warmers with vest"
        );
        assert_eq!(
            rec.explanation[1],
            "High wind conditions - wind protection needed"
        );
    }

    #[test]
    fn test_heavy_rain_when_cold() {
        let rec = recommend(&summary(10.0, 10.0, 0.8), &config(Units::Metric));

        assert!(rec.accessories.contains(&"Waterproof jacket".to_string()));
        assert!(!rec.accessories.contains(&"Rain jacket".to_string()));
        assert_eq!(
            rec.explanation[1],
            "Heavy rain expected - waterproof protection essential"
        );
        // min_temp below 10 triggers the advisory as the final entry.
        assert!(rec.explanation.last().unwrap().contains("removable layers"));
    }

    #[test]
    fn test_moderate_rain_gets_rain_jacket() {
        let rec = recommend(&summary(10.0, 10.0, 0.5), &config(Units::Metric));

        assert!(rec.accessories.contains(&"Rain jacket".to_string()));
        assert!(!rec.accessories.contains(&"Waterproof jacket".to_string()));
        assert_eq!(
            rec.explanation[1],
            "Rain likely - rain protection recommended"
        );
    }

    #[test]
    fn test_heavy_rain_but_warm_downgrades_to_rain_jacket() {
        // P > 70% but T >= 15: the heavy tier requires cold, so the
        // standard tier fires instead.
        let rec = recommend(&summary(18.0, 10.0, 0.9), &config(Units::Metric));

        assert!(rec.accessories.contains(&"Rain jacket".to_string()));
        assert!(!rec.accessories.contains(&"Waterproof jacket".to_string()));
    }

    #[test]
    fn test_band_partition_totality_at_boundaries() {
        for t in [
            30.0, 22.001, 22.0, 21.999, 18.0, 17.999, 14.0, 13.999, 10.0, 9.999, 6.0, 5.999,
            0.0, -15.0,
        ] {
            let rec = recommend(&summary(t, 5.0, 0.0), &config(Units::Metric));
            assert_eq!(
                band_explanations(&rec),
                1,
                "exactly one band must fire at T={t}"
            );
            assert!(!rec.main_kit.is_empty());
        }
    }

    #[test]
    fn test_boundary_ties_go_to_warmer_band() {
        // 22.0 belongs to the 18..=22 band, not the summer band.
        let at_22 = recommend(&summary(22.0, 5.0, 0.0), &config(Units::Metric));
        assert_eq!(at_22.explanation[0], "Moderate warmth - arm warmers optional");

        // 18.0, 14.0, 10.0 and 6.0 each belong to the band they open.
        let at_18 = recommend(&summary(18.0, 5.0, 0.0), &config(Units::Metric));
        assert_eq!(at_18.explanation[0], "Moderate warmth - arm warmers optional");
        let at_14 = recommend(&summary(14.0, 5.0, 0.0), &config(Units::Metric));
        assert_eq!(at_14.explanation[0], "Cool conditions - arm warmers recommended");
        let at_10 = recommend(&summary(10.0, 5.0, 0.0), &config(Units::Metric));
        assert_eq!(
            at_10.explanation[0],
            "Cool conditions - long sleeves or arm warmers with vest"
        );
        let at_6 = recommend(&summary(6.0, 5.0, 0.0), &config(Units::Metric));
        assert_eq!(at_6.explanation[0], "Cold conditions - thermal layers and jacket");
    }

    #[test]
    fn test_determinism() {
        let weather = summary(11.5, 27.0, 0.65);
        let cfg = config(Units::Metric);

        let a = recommend(&weather, &cfg);
        let b = recommend(&weather, &cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unit_invariance() {
        for (t, w, p) in [
            (25.0, 10.0, 0.0),
            (10.0, 25.0, 0.0),
            (10.0, 10.0, 0.8),
            (8.0, 10.0, 0.0),
            (16.0, 30.0, 0.5),
        ] {
            let metric = recommend(&summary(t, w, p), &config(Units::Metric));

            let mut imperial_weather = summary(t, w, p);
            imperial_weather.min_temp = celsius_to_fahrenheit(imperial_weather.min_temp);
            imperial_weather.max_temp = celsius_to_fahrenheit(imperial_weather.max_temp);
            imperial_weather.min_feels_like =
                celsius_to_fahrenheit(imperial_weather.min_feels_like);
            imperial_weather.max_feels_like =
                celsius_to_fahrenheit(imperial_weather.max_feels_like);
            imperial_weather.max_wind_speed = kmh_to_mph(imperial_weather.max_wind_speed);
            let imperial = recommend(&imperial_weather, &config(Units::Imperial));

            assert_eq!(metric, imperial, "scenario T={t} W={w} P={p}");
        }
    }

    #[test]
    fn test_wind_modifier_is_isolated() {
        let calm = recommend(&summary(10.0, 5.0, 0.0), &config(Units::Metric));
        let windy = recommend(&summary(10.0, 25.0, 0.0), &config(Units::Metric));

        assert_eq!(calm.main_kit, windy.main_kit);
        let added: Vec<_> = windy
            .accessories
            .iter()
            .filter(|a| !calm.accessories.contains(a))
            .collect();
        assert_eq!(added, vec!["Wind vest"]);
        assert_eq!(windy.explanation.len(), calm.explanation.len() + 1);
    }

    #[test]
    fn test_rain_modifier_is_isolated() {
        let dry = recommend(&summary(10.0, 10.0, 0.0), &config(Units::Metric));
        let wet = recommend(&summary(10.0, 10.0, 0.8), &config(Units::Metric));

        assert_eq!(dry.main_kit, wet.main_kit);
        let added: Vec<_> = wet
            .accessories
            .iter()
            .filter(|a| !dry.accessories.contains(a))
            .collect();
        assert_eq!(added, vec!["Waterproof jacket"]);
    }

    #[test]
    fn test_no_duplicate_items() {
        let rec = recommend(&summary(5.0, 40.0, 0.95), &config(Units::Metric));

        let mut kit = rec.main_kit.clone();
        kit.sort();
        kit.dedup();
        assert_eq!(kit.len(), rec.main_kit.len());

        let mut acc = rec.accessories.clone();
        acc.sort();
        acc.dedup();
        assert_eq!(acc.len(), rec.accessories.len());
    }

    #[test]
    fn test_non_finite_input_does_not_panic() {
        let rec = recommend(&summary(f64::NAN, f64::NAN, f64::NAN), &config(Units::Metric));

        // NaN falls through the ladder into the coldest band; no modifier
        // comparison against NaN is true.
        assert_eq!(rec.main_kit, vec!["Winter jacket", "Full protection"]);
        assert_eq!(
            rec.explanation,
            vec!["Very cold conditions - full winter protection"]
        );

        let inf = recommend(
            &summary(f64::INFINITY, f64::INFINITY, 0.0),
            &config(Units::Metric),
        );
        assert_eq!(inf.main_kit, vec!["Short bib", "Summer jersey"]);
    }

    #[test]
    fn test_explanation_never_empty() {
        for t in [-20.0, 0.0, 10.0, 20.0, 40.0, f64::NAN] {
            let rec = recommend(&summary(t, 0.0, 0.0), &config(Units::Metric));
            assert!(!rec.explanation.is_empty());
        }
    }
}
