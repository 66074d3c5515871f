use anyhow::{bail, Result};
use chrono::Utc;
use ridekit_core::{AppError, Config, ReqwestErrorExt};
use ridekit_engine::units::{celsius_to_fahrenheit, kmh_to_mph};
use ridekit_engine::{recommend, ClothingRecommendation, RideConfig, Units, WeatherSummary};
use ridekit_weather::{demo_summary, geocode_city, WeatherCache, WeatherProvider};

struct Args {
    city: Option<String>,
    duration_hours: f64,
    imperial: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        city: None,
        duration_hours: 2.0,
        imperial: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--imperial" => args.imperial = true,
            "--duration" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--duration needs a value in hours"))?;
                args.duration_hours = value.parse()?;
                if args.duration_hours <= 0.0 {
                    bail!("ride duration must be positive");
                }
            }
            "--help" | "-h" => {
                println!("Usage: ridekit [CITY] [--duration HOURS] [--imperial]");
                println!("Without a CITY, demo weather is generated.");
                std::process::exit(0);
            }
            other if !other.starts_with('-') => args.city = Some(other.to_string()),
            other => bail!("unknown option: {other}"),
        }
    }

    Ok(args)
}

/// Map a weather collaborator error onto the UI-facing hierarchy.
fn weather_app_error(e: ridekit_weather::WeatherError) -> AppError {
    use ridekit_core::WeatherError as UiWeatherError;
    match e {
        ridekit_weather::WeatherError::Network(e) => AppError::Network(e.into_network_error()),
        ridekit_weather::WeatherError::InvalidApiKey(_) => UiWeatherError::InvalidApiKey.into(),
        ridekit_weather::WeatherError::NoData => UiWeatherError::NoForecast.into(),
        ridekit_weather::WeatherError::CityNotFound(city) => {
            UiWeatherError::LocationNotFound(city).into()
        }
        ridekit_weather::WeatherError::Cache(msg) => UiWeatherError::CacheError(msg).into(),
        other => UiWeatherError::ApiError(other.to_string()).into(),
    }
}

fn print_recommendation(summary: &WeatherSummary, rec: &ClothingRecommendation, units: Units) {
    let (temp_unit, wind_unit) = match units {
        Units::Metric => ("°C", "km/h"),
        Units::Imperial => ("°F", "mph"),
    };
    let show_temp = |c: f64| match units {
        Units::Metric => c,
        Units::Imperial => celsius_to_fahrenheit(c),
    };
    let show_wind = |kmh: f64| match units {
        Units::Metric => kmh,
        Units::Imperial => kmh_to_mph(kmh),
    };

    println!("Conditions over the ride window:");
    println!(
        "  Feels like {:.1}{} to {:.1}{}",
        show_temp(summary.min_feels_like),
        temp_unit,
        show_temp(summary.max_feels_like),
        temp_unit
    );
    println!(
        "  Wind up to {:.0} {}, rain probability {:.0}%",
        show_wind(summary.max_wind_speed),
        wind_unit,
        summary.max_rain_probability * 100.0
    );

    println!("\nMain kit:");
    for item in &rec.main_kit {
        println!("  - {item}");
    }
    if !rec.accessories.is_empty() {
        println!("Accessories:");
        for item in &rec.accessories {
            println!("  - {item}");
        }
    }
    println!("\nWhy:");
    for line in &rec.explanation {
        println!("  {line}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    ridekit_core::init()?;

    let args = parse_args()?;
    if let Err(e) = run(args).await {
        tracing::error!("{e}");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: Args) -> std::result::Result<(), AppError> {
    let (config, validation) = Config::load_validated()?;
    if !validation.is_valid() {
        return Err(ridekit_core::ConfigError::Invalid(validation.error_summary()).into());
    }

    let display_units = if args.imperial {
        Units::Imperial
    } else {
        config.units
    };

    let summary = match &args.city {
        None => {
            tracing::info!("No city given; generating demo weather");
            demo_summary()
        }
        Some(city) => {
            let base_url = &config.weather.api_base_url;
            let location = geocode_city(base_url, city)
                .await
                .map_err(weather_app_error)?;
            tracing::info!(
                "Riding from {} ({:.1}, {:.1})",
                location.city.as_deref().unwrap_or(city),
                location.lat,
                location.lon
            );

            let ride = RideConfig {
                start_time: Utc::now(),
                duration_hours: args.duration_hours,
                units: display_units,
            };
            let provider = WeatherProvider::new(base_url).map_err(weather_app_error)?;
            let mut cache = WeatherCache::new(&config.config_dir, config.weather.cache_minutes);
            provider
                .fetch_summary_cached(&mut cache, &location, &ride)
                .await
                .map_err(weather_app_error)?
        }
    };

    // Summaries are metric at this point, from the provider or the demo
    // generator alike.
    let ride = RideConfig {
        start_time: Utc::now(),
        duration_hours: args.duration_hours,
        units: Units::Metric,
    };
    let rec = recommend(&summary, &ride);
    print_recommendation(&summary, &rec, display_units);

    Ok(())
}
