use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::{
    Config, GatewayError,
    gateway::openweather::OpenWeatherGateway,
    model::{RawForecastSample, WeatherSnapshot},
};

pub mod openweather;

/// Source of weather data for the store.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    async fn fetch_current_conditions(&self, city: &str) -> Result<WeatherSnapshot, GatewayError>;

    /// Sub-daily forecast samples, Celsius.
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<RawForecastSample>, GatewayError>;
}

/// Construct the OpenWeatherMap gateway from config.
pub fn gateway_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherGateway>> {
    if !config.is_configured() {
        anyhow::bail!(
            "No OpenWeatherMap API key configured.\n\
                 Hint: run `weather configure` or set OPENWEATHER_API_KEY."
        );
    }
    let api_key = config.openweather.api_key.clone().unwrap_or_default();

    let gateway = OpenWeatherGateway::new(
        api_key,
        config.openweather.base_url.clone(),
        config.openweather.timeout(),
    )?;

    Ok(Arc::new(gateway))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = gateway_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeatherMap API key configured"));
        assert!(msg.contains("Hint: run `weather configure`"));
    }

    #[test]
    fn gateway_from_config_rejects_blank_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".to_string());

        assert!(gateway_from_config(&cfg).is_err());
    }

    #[test]
    fn gateway_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(gateway_from_config(&cfg).is_ok());
    }
}
