//! Weather service
//!
//! Single entry point for fetch requests. Owns the adapter registry, the
//! cache policy, and the stale-on-error fallback. The registry is populated
//! once at construction from whichever credentials existed at startup and is
//! immutable afterwards; a provider with no credential is simply absent.

use std::collections::HashMap;
use std::sync::Arc;

use domain::{CityQuery, ProviderId, TemperatureUnit, WeatherReport};
use tracing::{debug, instrument, warn};

use crate::error::WeatherError;
use crate::ports::{CacheKey, CacheStorePort, ProviderPort};

/// Orchestrates adapter selection, cache lookup, live fetch, and fallback
///
/// Explicitly constructed and passed around; independent instances with
/// different registries can coexist.
pub struct WeatherService {
    adapters: HashMap<ProviderId, Arc<dyn ProviderPort>>,
    registration_order: Vec<ProviderId>,
    cache: Arc<dyn CacheStorePort>,
}

impl std::fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherService")
            .field("providers", &self.registration_order)
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a service over a registry and a cache store
    ///
    /// Registration order is preserved and is what
    /// [`available_providers`](Self::available_providers) reports. A
    /// duplicate provider id keeps its first position but the later adapter
    /// wins the slot.
    #[must_use]
    pub fn new(
        adapters: Vec<(ProviderId, Arc<dyn ProviderPort>)>,
        cache: Arc<dyn CacheStorePort>,
    ) -> Self {
        let mut map: HashMap<ProviderId, Arc<dyn ProviderPort>> = HashMap::new();
        let mut registration_order = Vec::new();
        for (id, adapter) in adapters {
            if map.insert(id, adapter).is_none() {
                registration_order.push(id);
            }
        }
        Self {
            adapters: map,
            registration_order,
            cache,
        }
    }

    /// Configured provider ids, in registration order
    ///
    /// Stable across calls; reflects only which credentials were present at
    /// startup, never fetch history.
    #[must_use]
    pub fn available_providers(&self) -> &[ProviderId] {
        &self.registration_order
    }

    /// Human-readable label for a provider
    ///
    /// Falls back to the raw identifier when the provider is unconfigured;
    /// never fails.
    #[must_use]
    pub fn provider_name(&self, provider: ProviderId) -> String {
        self.adapters
            .get(&provider)
            .map_or_else(|| provider.to_string(), |adapter| adapter.name().to_string())
    }

    /// Fetch weather for a city from a provider
    ///
    /// With `use_cache`, a non-expired cache hit returns immediately and no
    /// network call happens. On a live-fetch failure the cache is consulted
    /// once more ignoring expiry, and a stale entry is served as-is rather
    /// than failing; only when nothing is cached does the original error
    /// reach the caller.
    ///
    /// # Errors
    ///
    /// [`WeatherError::ProviderNotConfigured`] when `provider` has no
    /// registered adapter (checked before anything else, no network
    /// attempt); otherwise the adapter's failure when no fallback entry
    /// exists.
    #[instrument(skip(self), fields(city = %city, provider = %provider, unit = %unit))]
    pub async fn fetch_weather(
        &self,
        city: &CityQuery,
        provider: ProviderId,
        unit: TemperatureUnit,
        use_cache: bool,
    ) -> Result<WeatherReport, WeatherError> {
        let adapter = self
            .adapters
            .get(&provider)
            .ok_or(WeatherError::ProviderNotConfigured(provider))?;

        let key = CacheKey::new(city, provider, unit);

        if use_cache {
            if let Some(entry) = self.cache.get(&key).await {
                debug!(key = %key.storage_key(), "serving cached weather");
                return Ok(entry.data);
            }
        }

        match adapter.fetch_weather(city, unit).await {
            Ok(report) => {
                self.cache.set(&key, &report).await;
                Ok(report)
            },
            Err(err) => {
                warn!(error = %err, key = %key.storage_key(), "live fetch failed, trying stale cache");
                if let Some(stale) = self.cache.get_ignoring_expiry(&key).await {
                    debug!(
                        key = %key.storage_key(),
                        written_at = stale.timestamp,
                        "recovered with stale cache entry"
                    );
                    return Ok(stale.data);
                }
                Err(err)
            },
        }
    }
}
