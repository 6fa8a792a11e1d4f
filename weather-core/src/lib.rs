//! Client library for the OpenWeatherMap current weather API.
//!
//! This crate defines:
//! - Validated request settings (unit, language, API key)
//! - Query construction for the four lookup modes (name, coordinates, id, zip)
//! - The typed observation model the responses decode into
//! - Configuration & credentials handling
//!
//! It is used by `current-weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod language;
pub mod model;
pub mod query;
pub mod unit;

pub use client::{ClientConfig, CurrentWeatherApi, CurrentWeatherClient, DEFAULT_BASE_URL};
pub use config::{API_KEY_ENV, Config, resolve_api_key, resolve_api_key_at, resolve_api_key_from};
pub use error::OwmError;
pub use language::Language;
pub use model::{Clouds, Coordinates, CurrentWeatherData, Main, Sys, WeatherCondition, Wind};
pub use query::Query;
pub use unit::Unit;
