//! Shared weather state: fetch orchestration, unit selection and the views
//! handed to consumers.
//!
//! Canonical data is stored in Celsius only. Every read projects it into
//! the selected unit, so toggling never accumulates rounding error.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    error::{GatewayError, WeatherError},
    gateway::WeatherGateway,
    model::{ForecastSet, WeatherSnapshot},
    units::TemperatureUnit,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// What happened to the result of a `search` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The result is now the store's state.
    Applied,
    /// A later search was issued first; this result was dropped.
    Superseded,
}

/// Read-only projection of the store in the selected unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub snapshot: Option<WeatherSnapshot>,
    pub forecast: Option<ForecastSet>,
    pub loading: bool,
    pub error: Option<WeatherError>,
    pub unit: TemperatureUnit,
}

impl WeatherView {
    pub fn status(&self) -> StoreStatus {
        status_of(self.loading, self.error.is_some(), self.snapshot.is_some())
    }
}

fn status_of(loading: bool, has_error: bool, has_data: bool) -> StoreStatus {
    if loading {
        StoreStatus::Loading
    } else if has_error {
        StoreStatus::Failed
    } else if has_data {
        StoreStatus::Ready
    } else {
        StoreStatus::Idle
    }
}

#[derive(Debug, Default)]
struct StoreState {
    snapshot: Option<WeatherSnapshot>,
    forecast: Option<ForecastSet>,
    loading: bool,
    error: Option<WeatherError>,
    unit: TemperatureUnit,
    /// Sequence number of the most recently issued search.
    latest_search: u64,
}

impl StoreState {
    fn status(&self) -> StoreStatus {
        status_of(self.loading, self.error.is_some(), self.snapshot.is_some())
    }

    fn fail(&mut self, error: WeatherError) {
        self.snapshot = None;
        self.forecast = None;
        self.error = Some(error);
        self.loading = false;
    }

    fn project(&self) -> WeatherView {
        WeatherView {
            snapshot: self.snapshot.as_ref().map(|s| s.in_unit(self.unit)),
            forecast: self.forecast.as_ref().map(|f| f.in_unit(self.unit)),
            loading: self.loading,
            error: self.error.clone(),
            unit: self.unit,
        }
    }
}

/// Single owner of weather state, shared by reference (`Arc<WeatherStore>`)
/// between every consumer that renders or mutates it.
#[derive(Debug)]
pub struct WeatherStore {
    gateway: Arc<dyn WeatherGateway>,
    state: Mutex<StoreState>,
}

impl WeatherStore {
    pub fn new(gateway: Arc<dyn WeatherGateway>) -> Self {
        Self {
            gateway,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Fetch current conditions and then the forecast for `city`.
    ///
    /// Only the most recently issued search may write to the store; an
    /// earlier one that resolves late returns `Ok(SearchOutcome::Superseded)`
    /// and leaves the state untouched, whether it succeeded or failed.
    ///
    /// # Errors
    ///
    /// Returns the error now held by the store when this search was applied
    /// and failed: a validation error for a blank city, otherwise the
    /// gateway's error.
    pub async fn search(&self, city: &str) -> Result<SearchOutcome, WeatherError> {
        let city = city.trim();

        if city.is_empty() {
            let error = WeatherError::empty_city();
            let mut state = self.state.lock();
            state.latest_search += 1;
            state.fail(error.clone());
            return Err(error);
        }

        let seq = {
            let mut state = self.state.lock();
            state.latest_search += 1;
            state.error = None;
            state.loading = true;
            state.latest_search
        };
        info!(city, seq, "search started");

        let result = self.fetch(city).await;

        let mut state = self.state.lock();
        if state.latest_search != seq {
            debug!(city, seq, latest = state.latest_search, "discarding superseded search result");
            return Ok(SearchOutcome::Superseded);
        }

        match result {
            Ok((snapshot, forecast)) => {
                info!(city, seq, days = forecast.len(), "search completed");
                state.snapshot = Some(snapshot);
                state.forecast = Some(forecast);
                state.error = None;
                state.loading = false;
                Ok(SearchOutcome::Applied)
            }
            Err(err) => {
                let error = WeatherError::from(err);
                warn!(city, seq, error = %error, code = ?error.code, "search failed");
                state.fail(error.clone());
                Err(error)
            }
        }
    }

    async fn fetch(&self, city: &str) -> Result<(WeatherSnapshot, ForecastSet), GatewayError> {
        let snapshot = self.gateway.fetch_current_conditions(city).await?;
        let samples = self.gateway.fetch_forecast(city).await?;
        Ok((snapshot, ForecastSet::from_samples(&samples)))
    }

    /// Flip between Celsius and Fahrenheit, returning the new unit.
    pub fn toggle_temperature_unit(&self) -> TemperatureUnit {
        let mut state = self.state.lock();
        state.unit = state.unit.toggled();
        state.unit
    }

    /// Leave the `Failed` state. Has no effect in any other state.
    pub fn clear_error(&self) {
        let mut state = self.state.lock();
        if state.status() == StoreStatus::Failed {
            state.error = None;
        }
    }

    pub fn current_view(&self) -> WeatherView {
        self.state.lock().project()
    }

    pub fn status(&self) -> StoreStatus {
        self.state.lock().status()
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.state.lock().unit
    }
}
