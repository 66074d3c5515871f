//! On-disk weather cache.
//!
//! A single JSON file under the config directory, holding one entry per
//! (location, ride window) key. Entries expire after a configurable
//! freshness window; entries without an hourly series are treated as misses so
//! upgrades from older cache files refetch instead of serving partial
//! data.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Timelike, Utc};
use ridekit_engine::{RideConfig, WeatherSummary};
use serde::{Deserialize, Serialize};

use crate::types::{Location, WeatherError};

/// Default freshness window in minutes.
pub const DEFAULT_CACHE_MINUTES: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    data: WeatherSummary,
}

#[derive(Debug)]
pub struct WeatherCache {
    cache_path: PathBuf,
    freshness_minutes: u32,
    entries: HashMap<String, CacheEntry>,
}

impl WeatherCache {
    /// Open (or create) the cache file under the given config directory.
    ///
    /// `freshness_minutes` is how long entries stay usable; 0 disables the
    /// cache entirely, so every lookup is a miss.
    pub fn new(config_dir: &Path, freshness_minutes: u32) -> Self {
        let cache_path = config_dir.join("weather_cache.json");
        let entries = Self::load_entries(&cache_path);
        Self {
            cache_path,
            freshness_minutes,
            entries,
        }
    }

    fn load_entries(path: &Path) -> HashMap<String, CacheEntry> {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return HashMap::new();
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                // A corrupt cache file is discarded, not fatal.
                tracing::warn!("Discarding unreadable weather cache: {}", e);
                HashMap::new()
            }
        }
    }

    /// Cache key for a location and ride window.
    ///
    /// Coordinates are rounded to one decimal place, the start time to
    /// the hour, and the duration to one decimal place, so near-identical
    /// requests share an entry.
    pub fn key(location: &Location, config: &RideConfig) -> String {
        let start_hour = config
            .start_time
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(config.start_time);
        let duration = (config.duration_hours * 10.0).round() / 10.0;
        format!(
            "{:.1},{:.1},{},{}",
            location.lat,
            location.lon,
            start_hour.timestamp(),
            duration
        )
    }

    /// Return the cached summary for `key` if it is still fresh and has
    /// an hourly series.
    pub fn get_fresh(&self, key: &str) -> Option<WeatherSummary> {
        if self.freshness_minutes == 0 {
            return None;
        }
        let entry = self.entries.get(key)?;
        let age = Utc::now() - entry.fetched_at;
        if age > Duration::minutes(i64::from(self.freshness_minutes)) {
            return None;
        }
        match &entry.data.hourly {
            Some(hourly) if !hourly.is_empty() => Some(entry.data.clone()),
            _ => None,
        }
    }

    /// Store a summary under `key` and persist the cache file.
    ///
    /// Expired entries are dropped on the way out so the file does not
    /// grow without bound.
    pub fn put(&mut self, key: &str, summary: &WeatherSummary) -> Result<(), WeatherError> {
        let now = Utc::now();
        let freshness = Duration::minutes(i64::from(self.freshness_minutes));
        self.entries
            .retain(|_, entry| now - entry.fetched_at <= freshness);
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                fetched_at: now,
                data: summary.clone(),
            },
        );
        self.persist()
    }

    fn persist(&self) -> Result<(), WeatherError> {
        if let Some(parent) = self.cache_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| WeatherError::Cache(format!("create {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| WeatherError::Cache(e.to_string()))?;
        std::fs::write(&self.cache_path, json)
            .map_err(|e| WeatherError::Cache(format!("write {}: {e}", self.cache_path.display())))
    }
}
