//! Skycast CLI
//!
//! Thin text front door over the weather service: loads configuration,
//! builds the provider registry and cache store, fetches, and renders.

#![allow(clippy::print_stdout)]

mod render;

use std::sync::Arc;

use anyhow::{Context, bail};
use application::WeatherService;
use clap::{Parser, Subcommand};
use domain::{CityQuery, ProviderId, TemperatureUnit};
use infrastructure::{AppConfig, RedbCacheStore, build_provider_registry};
use tracing_subscriber::EnvFilter;

/// Skycast CLI
#[derive(Parser)]
#[command(name = "skycast")]
#[command(author, version, about = "City weather dashboard", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch current conditions and the 5-day forecast
    Fetch {
        /// City name; falls back to the configured default city
        city: Option<String>,

        /// Provider id (openweather | weatherapi); defaults to the first
        /// configured one
        #[arg(short, long)]
        provider: Option<String>,

        /// Unit system (celsius | fahrenheit)
        #[arg(short, long, default_value = "celsius")]
        unit: String,

        /// Bypass the cache and force a live fetch
        #[arg(long)]
        no_cache: bool,
    },

    /// List configured providers
    Providers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load().context("Failed to load configuration")?;
    let cache = Arc::new(
        RedbCacheStore::open(&config.cache.path).context("Failed to open the cache store")?,
    );
    let registry = build_provider_registry(&config)?;
    let service = WeatherService::new(registry, cache);

    match cli.command {
        Commands::Fetch {
            city,
            provider,
            unit,
            no_cache,
        } => fetch(&service, &config, city, provider, &unit, no_cache).await,
        Commands::Providers => {
            providers(&service);
            Ok(())
        },
    }
}

async fn fetch(
    service: &WeatherService,
    config: &AppConfig,
    city: Option<String>,
    provider: Option<String>,
    unit: &str,
    no_cache: bool,
) -> anyhow::Result<()> {
    let city = match city.or_else(|| config.default_city.clone()) {
        Some(name) => CityQuery::new(name)?,
        None => bail!("No city given and no default_city configured"),
    };

    let provider = match provider {
        Some(id) => id.parse::<ProviderId>()?,
        None => match service.available_providers().first() {
            Some(id) => *id,
            None => bail!("No weather provider is configured. Add an API key."),
        },
    };

    let unit = unit.parse::<TemperatureUnit>()?;
    let report = service
        .fetch_weather(&city, provider, unit, !no_cache)
        .await?;

    println!("{}", render::render_report(&report, unit));
    Ok(())
}

fn providers(service: &WeatherService) {
    let available = service.available_providers();
    if available.is_empty() {
        println!("No providers configured. Add an API key to config.toml or the environment.");
        return;
    }
    for id in available {
        println!("{id}  ({})", service.provider_name(*id));
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
