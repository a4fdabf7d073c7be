//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap API (<https://openweathermap.org/api>).
//! Current conditions and the 3-hourly forecast live on separate endpoints,
//! so one logical fetch issues two concurrent requests and joins them.

pub mod client;
mod models;

pub use client::{OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};
