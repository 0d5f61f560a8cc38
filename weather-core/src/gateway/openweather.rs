use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    GatewayError,
    condition::WeatherCondition,
    model::{RawForecastSample, WeatherSnapshot},
    units::round_temperature,
};

use super::WeatherGateway;

const CURRENT_FALLBACK: &str = "Failed to fetch weather data";
const FORECAST_FALLBACK: &str = "Failed to fetch forecast data";

/// OpenWeatherMap 2.5 API (`/weather` and `/forecast`), metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherGateway {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherGateway {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                GatewayError::with_code(format!("Failed to build HTTP client: {e}"), "client")
            })?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        fallback: &str,
    ) -> Result<T, GatewayError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, endpoint, "OpenWeather request failed");
                GatewayError::with_code(fallback, "network")
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            warn!(error = %e, endpoint, "failed to read OpenWeather response body");
            GatewayError::with_code(fallback, "network")
        })?;

        if !status.is_success() {
            warn!(%status, endpoint, body = %truncate_body(&body), "OpenWeather returned an error");
            return Err(error_from_body(&body, status.as_u16(), fallback));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, endpoint, "failed to parse OpenWeather JSON");
            GatewayError::with_code(fallback, "parse")
        })
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherGateway {
    #[instrument(skip(self))]
    async fn fetch_current_conditions(&self, city: &str) -> Result<WeatherSnapshot, GatewayError> {
        let parsed: OwCurrentResponse = self.get("weather", city, CURRENT_FALLBACK).await?;
        debug!(city = %parsed.name, "current conditions received");

        let weather = parsed.weather.into_iter().next().unwrap_or_default();

        Ok(WeatherSnapshot {
            city: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            temperature: round_temperature(parsed.main.temp),
            feels_like: round_temperature(parsed.main.feels_like),
            condition: WeatherCondition::normalize(&weather.main),
            description: weather.description,
            humidity: parsed.main.humidity,
            wind_speed: mps_to_kmh(parsed.wind.speed),
            visibility: parsed.visibility.map(|m| m / 1000.0).unwrap_or_default(),
            icon: weather.icon,
            timestamp: parsed.dt,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<RawForecastSample>, GatewayError> {
        let parsed: OwForecastResponse = self.get("forecast", city, FORECAST_FALLBACK).await?;
        debug!(samples = parsed.list.len(), "forecast received");

        Ok(parsed
            .list
            .into_iter()
            .map(|entry| {
                let weather = entry.weather.into_iter().next().unwrap_or_default();
                RawForecastSample {
                    timestamp: entry.dt,
                    temp_min: entry.main.temp_min,
                    temp_max: entry.main.temp_max,
                    condition: weather.main,
                    icon: weather.icon,
                }
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwWeather {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
    /// metres
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

/// Error payload, e.g. `{"cod":"404","message":"city not found"}`.
/// `cod` is a string on some endpoints and a number on others.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    cod: Option<serde_json::Value>,
    message: Option<String>,
}

fn error_from_body(body: &str, status: u16, fallback: &str) -> GatewayError {
    let parsed = serde_json::from_str::<OwErrorBody>(body).ok();

    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    let code = parsed
        .and_then(|b| b.cod)
        .and_then(|cod| match cod {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| status.to_string());

    GatewayError::with_code(message, code)
}

fn mps_to_kmh(mps: f64) -> f64 {
    (mps * 3.6 * 10.0).round() / 10.0
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
