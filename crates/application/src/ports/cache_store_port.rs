//! Cache store port
//!
//! Time-bounded key/value store for fetched weather reports, keyed by
//! (city, provider, unit) and backed by durable storage. Caching is a
//! best-effort optimization: reads that go wrong are misses, writes that go
//! wrong are logged and swallowed by the implementation, and nothing here
//! ever fails the request that triggered it.

use std::time::Duration;

use async_trait::async_trait;
use domain::{CityQuery, ProviderId, TemperatureUnit, WeatherReport};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Time-to-live after which an entry is stale for normal reads
pub const CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Prefix shared by every storage record key
pub const CACHE_KEY_PREFIX: &str = "weather_cache_";

/// Composite cache key: lowercased city, provider, unit
///
/// The unit is part of the key because values are stored pre-converted;
/// switching units means a different record, never a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    city: String,
    provider: ProviderId,
    unit: TemperatureUnit,
}

impl CacheKey {
    /// Build the key for a query
    #[must_use]
    pub fn new(city: &CityQuery, provider: ProviderId, unit: TemperatureUnit) -> Self {
        Self {
            city: city.cache_form(),
            provider,
            unit,
        }
    }

    /// Lowercased city component
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Provider component
    #[must_use]
    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    /// Unit component
    #[must_use]
    pub const fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// The storage record key: `weather_cache_<city>_<provider>_<unit>`
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!(
            "{CACHE_KEY_PREFIX}{}_{}_{}",
            self.city, self.provider, self.unit
        )
    }
}

/// The persisted cache record: a report plus the fetch metadata
///
/// Field names are contractual; this struct is the JSON document layout on
/// disk. `timestamp` is the wall-clock fetch time in epoch milliseconds and
/// is never refreshed after the write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedReport {
    /// The fetched report
    pub data: WeatherReport,
    /// Fetch time, epoch milliseconds
    pub timestamp: u64,
    /// Provider the report was fetched from
    pub provider: ProviderId,
    /// Unit system the report was fetched under
    pub unit: TemperatureUnit,
    /// Lowercased city the report was fetched for
    pub city: String,
}

impl CachedReport {
    /// Assemble a freshly timestamped record for a key
    #[must_use]
    pub fn new(key: &CacheKey, data: WeatherReport, timestamp: u64) -> Self {
        Self {
            data,
            timestamp,
            provider: key.provider(),
            unit: key.unit(),
            city: key.city().to_string(),
        }
    }

    /// Whether the entry's age at `now_millis` exceeds [`CACHE_TTL`]
    ///
    /// Strictly exceeds: an entry is still fresh at exactly TTL age.
    #[must_use]
    pub const fn is_expired(&self, now_millis: u64) -> bool {
        now_millis.saturating_sub(self.timestamp) > CACHE_TTL.as_millis() as u64
    }
}

/// Port for the durable weather cache
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CacheStorePort: Send + Sync {
    /// Expiry-enforced read
    ///
    /// Absent on: no record, unreadable record, or a record older than the
    /// TTL. An expired record is deleted as a side effect of this read; an
    /// unreadable one is left in place.
    async fn get(&self, key: &CacheKey) -> Option<CachedReport>;

    /// Read without the age check, used solely for the error-fallback path
    ///
    /// Never deletes anything.
    async fn get_ignoring_expiry(&self, key: &CacheKey) -> Option<CachedReport>;

    /// Overwrite the record for `key` with a freshly timestamped entry
    ///
    /// Storage failures are logged and swallowed by the implementation.
    async fn set(&self, key: &CacheKey, report: &WeatherReport);
}
