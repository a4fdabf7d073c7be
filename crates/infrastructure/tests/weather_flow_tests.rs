//! End-to-end flow tests: real service, real adapters, real cache store
//!
//! Wires the weather service over the actual integration clients (against
//! wiremock servers) and a file-backed redb cache, and walks the full
//! fetch / cache / fallback paths.

use std::sync::Arc;

use application::ports::{CacheKey, CacheStorePort};
use application::{WeatherError, WeatherService};
use domain::{CityQuery, ProviderId, TemperatureUnit};
use infrastructure::{AppConfig, RedbCacheStore, build_provider_registry};
use secrecy::SecretString;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openweather_current() -> serde_json::Value {
    serde_json::json!({
        "name": "London",
        "sys": { "country": "GB" },
        "main": { "temp": 18.4, "feels_like": 17.6, "humidity": 72, "pressure": 1012.0 },
        "weather": [ { "main": "Clouds", "description": "scattered clouds", "icon": "03d" } ],
        "wind": { "speed": 13.6 },
        "dt": 1_786_104_000
    })
}

fn openweather_forecast() -> serde_json::Value {
    const DAY: i64 = 1_786_060_800;
    serde_json::json!({
        "list": [
            {
                "dt": DAY + 12 * 3600,
                "main": { "temp_max": 21.7, "temp_min": 13.1 },
                "weather": [ { "main": "Rain", "description": "light rain", "icon": "10d" } ],
                "pop": 0.4
            }
        ]
    })
}

fn weatherapi_forecast() -> serde_json::Value {
    serde_json::json!({
        "location": { "name": "London", "country": "United Kingdom" },
        "current": {
            "temp_c": 18.0, "temp_f": 64.4,
            "feelslike_c": 17.0, "feelslike_f": 62.6,
            "condition": { "text": "Partly cloudy", "icon": "//cdn/116.png", "code": 1003 },
            "humidity": 70,
            "wind_kph": 12.0, "wind_mph": 7.5,
            "pressure_mb": 1011.0,
            "last_updated_epoch": 1_786_104_000
        },
        "forecast": { "forecastday": [] }
    })
}

struct TestHarness {
    service: WeatherService,
    cache: Arc<RedbCacheStore>,
    _cache_dir: TempDir,
}

/// Build a service whose providers point at the given mock servers
fn harness(openweather: Option<&MockServer>, weatherapi: Option<&MockServer>) -> TestHarness {
    let mut config = AppConfig::default();
    if let Some(server) = openweather {
        config.providers.openweather.api_key = Some(SecretString::from("ow-key".to_string()));
        config.providers.openweather.base_url = server.uri();
    }
    if let Some(server) = weatherapi {
        config.providers.weatherapi.api_key = Some(SecretString::from("wa-key".to_string()));
        config.providers.weatherapi.base_url = server.uri();
    }

    let cache_dir = TempDir::new().unwrap();
    let cache = Arc::new(RedbCacheStore::open(cache_dir.path().join("cache.redb")).unwrap());
    let registry = build_provider_registry(&config).unwrap();
    TestHarness {
        service: WeatherService::new(registry, Arc::clone(&cache) as Arc<dyn CacheStorePort>),
        cache,
        _cache_dir: cache_dir,
    }
}

async fn mount_openweather_success(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openweather_current()))
        .expect(expected_calls)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openweather_forecast()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn london() -> CityQuery {
    CityQuery::new("london").unwrap()
}

#[tokio::test]
async fn first_fetch_hits_the_network_and_writes_the_cache_record() {
    let server = MockServer::start().await;
    mount_openweather_success(&server, 1).await;
    let harness = harness(Some(&server), None);

    let report = harness
        .service
        .fetch_weather(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius, true)
        .await
        .unwrap();

    // City name comes back in the upstream's casing, not the query's
    assert_eq!(report.current.city, "London");
    assert_eq!(report.forecast.len(), 1);

    // Exactly one record, under the contractual key
    let key = CacheKey::new(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius);
    assert_eq!(key.storage_key(), "weather_cache_london_openweather_celsius");
    let entry = harness.cache.get_ignoring_expiry(&key).await.unwrap();
    assert_eq!(entry.data, report);
}

#[tokio::test]
async fn second_fetch_is_served_from_cache_without_network_calls() {
    let server = MockServer::start().await;
    // The mocks verify exactly one call per endpoint on drop
    mount_openweather_success(&server, 1).await;
    let harness = harness(Some(&server), None);

    let first = harness
        .service
        .fetch_weather(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius, true)
        .await
        .unwrap();
    // Query casing differs; the cache key is lowercased so this still hits
    let second = harness
        .service
        .fetch_weather(
            &CityQuery::new("London").unwrap(),
            ProviderId::OpenWeather,
            TemperatureUnit::Celsius,
            true,
        )
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn weatherapi_issues_a_single_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherapi_forecast()))
        .expect(1)
        .mount(&server)
        .await;
    let harness = harness(None, Some(&server));

    let report = harness
        .service
        .fetch_weather(&london(), ProviderId::WeatherApi, TemperatureUnit::Celsius, true)
        .await
        .unwrap();

    assert_eq!(report.current.city, "London");
    assert_eq!(report.current.country, "United Kingdom");
}

#[tokio::test]
async fn failed_refetch_serves_the_stale_entry_without_refreshing_it() {
    let server = MockServer::start().await;
    mount_openweather_success(&server, 1).await;
    let harness = harness(Some(&server), None);

    let report = harness
        .service
        .fetch_weather(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius, true)
        .await
        .unwrap();

    let key = CacheKey::new(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius);
    let written = harness.cache.get_ignoring_expiry(&key).await.unwrap();

    // Upstream starts failing; bypass the cache to force a live attempt
    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let recovered = harness
        .service
        .fetch_weather(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius, false)
        .await
        .unwrap();

    assert_eq!(recovered, report);
    // The entry was reused as-is, not rewritten
    let after = harness.cache.get_ignoring_expiry(&key).await.unwrap();
    assert_eq!(after.timestamp, written.timestamp);
}

#[tokio::test]
async fn failure_with_no_cached_entry_surfaces_the_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;
    let harness = harness(Some(&server), None);

    let err = harness
        .service
        .fetch_weather(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius, true)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "city not found");
}

#[tokio::test]
async fn unconfigured_provider_fails_without_any_network_attempt() {
    let weatherapi = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherapi_forecast()))
        .expect(0)
        .mount(&weatherapi)
        .await;
    let harness = harness(None, Some(&weatherapi));

    assert_eq!(
        harness.service.available_providers(),
        [ProviderId::WeatherApi]
    );

    let err = harness
        .service
        .fetch_weather(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius, true)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WeatherError::ProviderNotConfigured(ProviderId::OpenWeather)
    );
}

#[tokio::test]
async fn provider_names_resolve_for_configured_and_unconfigured_ids() {
    let server = MockServer::start().await;
    let harness = harness(Some(&server), None);

    assert_eq!(
        harness.service.provider_name(ProviderId::OpenWeather),
        "OpenWeatherMap"
    );
    // Unconfigured falls back to the raw identifier
    assert_eq!(
        harness.service.provider_name(ProviderId::WeatherApi),
        "weatherapi"
    );
}

#[tokio::test]
async fn cached_reports_survive_a_service_restart() {
    let server = MockServer::start().await;
    mount_openweather_success(&server, 1).await;

    let mut config = AppConfig::default();
    config.providers.openweather.api_key = Some(SecretString::from("ow-key".to_string()));
    config.providers.openweather.base_url = server.uri();

    let cache_dir = TempDir::new().unwrap();
    let db_path = cache_dir.path().join("cache.redb");

    let report = {
        let cache = Arc::new(RedbCacheStore::open(&db_path).unwrap());
        let service = WeatherService::new(build_provider_registry(&config).unwrap(), cache);
        service
            .fetch_weather(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius, true)
            .await
            .unwrap()
    };

    // A fresh store over the same file serves the entry with no new fetch
    let cache = Arc::new(RedbCacheStore::open(&db_path).unwrap());
    let service = WeatherService::new(build_provider_registry(&config).unwrap(), cache);
    let cached = service
        .fetch_weather(&london(), ProviderId::OpenWeather, TemperatureUnit::Celsius, true)
        .await
        .unwrap();

    assert_eq!(cached, report);
}
