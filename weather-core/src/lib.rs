//! Core library for the `weather` app.
//!
//! This crate defines:
//! - The weather store: search orchestration, loading/error state and
//!   unit-adjusted views
//! - Reduction of the 3-hourly forecast feed into daily entries
//! - Abstraction over the weather service, with an OpenWeatherMap implementation
//! - Configuration handling
//!
//! It is used by `weather-cli`, but any front end can own a [`WeatherStore`]
//! and render its [`WeatherView`].

pub mod condition;
pub mod config;
pub mod error;
pub mod forecast;
pub mod gateway;
pub mod model;
pub mod store;
pub mod units;

pub use condition::WeatherCondition;
pub use config::{Config, OpenWeatherConfig};
pub use error::{ErrorKind, GatewayError, WeatherError};
pub use gateway::{WeatherGateway, gateway_from_config, openweather::OpenWeatherGateway};
pub use model::{ForecastDay, ForecastSet, RawForecastSample, TemperatureRange, WeatherSnapshot};
pub use store::{SearchOutcome, StoreStatus, WeatherStore, WeatherView};
pub use units::{TemperatureUnit, to_fahrenheit};
