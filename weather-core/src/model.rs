use serde::{Deserialize, Serialize};

use crate::{condition::WeatherCondition, units::TemperatureUnit};

/// Current conditions for one city, as returned by a gateway.
///
/// Temperatures are whole degrees Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub condition: WeatherCondition,
    pub description: String,
    pub humidity: u8,
    /// km/h
    pub wind_speed: f64,
    /// km
    pub visibility: f64,
    pub icon: String,
    /// Observation time, epoch seconds.
    pub timestamp: i64,
}

impl WeatherSnapshot {
    /// Copy of this snapshot with temperatures expressed in `unit`.
    pub fn in_unit(&self, unit: TemperatureUnit) -> Self {
        Self {
            temperature: unit.from_celsius(self.temperature),
            feels_like: unit.from_celsius(self.feels_like),
            ..self.clone()
        }
    }
}

/// One entry of the sub-daily forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastSample {
    /// Epoch seconds.
    pub timestamp: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Upstream label, normalized during reduction.
    pub condition: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// e.g. "Thu, Jun 26"
    pub date: String,
    /// e.g. "Thu"
    pub day_of_week: String,
    pub temperature: TemperatureRange,
    pub condition: WeatherCondition,
    pub icon: String,
}

impl ForecastDay {
    pub fn in_unit(&self, unit: TemperatureUnit) -> Self {
        Self {
            temperature: TemperatureRange {
                min: unit.from_celsius(self.temperature.min),
                max: unit.from_celsius(self.temperature.max),
            },
            ..self.clone()
        }
    }
}

/// Chronological daily forecast, at most [`ForecastSet::MAX_DAYS`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForecastSet {
    days: Vec<ForecastDay>,
}

impl ForecastSet {
    pub const MAX_DAYS: usize = 5;

    /// Bucket a raw feed into one entry per calendar day.
    pub fn from_samples(samples: &[RawForecastSample]) -> Self {
        Self {
            days: crate::forecast::reduce(samples),
        }
    }

    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn in_unit(&self, unit: TemperatureUnit) -> Self {
        Self {
            days: self.days.iter().map(|d| d.in_unit(unit)).collect(),
        }
    }
}
