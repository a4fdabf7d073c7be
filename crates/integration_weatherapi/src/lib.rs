//! WeatherAPI.com integration
//!
//! Client for the WeatherAPI forecast endpoint
//! (<https://www.weatherapi.com/docs/>). A single request returns current
//! conditions and the daily forecast together; both unit systems arrive in
//! parallel fields and the requested one is selected at parse time.

pub mod client;
mod models;

pub use client::{WeatherApiClient, WeatherApiConfig, WeatherApiError};
