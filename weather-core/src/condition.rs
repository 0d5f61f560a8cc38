use serde::{Deserialize, Serialize};

/// Closed set of conditions the app knows how to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Drizzle,
    Mist,
    Fog,
    Haze,
}

impl WeatherCondition {
    pub const fn all() -> &'static [WeatherCondition] {
        &[
            WeatherCondition::Clear,
            WeatherCondition::Clouds,
            WeatherCondition::Rain,
            WeatherCondition::Snow,
            WeatherCondition::Thunderstorm,
            WeatherCondition::Drizzle,
            WeatherCondition::Mist,
            WeatherCondition::Fog,
            WeatherCondition::Haze,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Clouds",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Haze => "Haze",
        }
    }

    /// Map an upstream `weather[].main` label onto the closed set.
    ///
    /// Matching is exact. Labels outside the vocabulary (e.g. "Tornado",
    /// "Smoke", "Dust") collapse to `Clear`, so new upstream labels are
    /// silently lost rather than reported.
    pub fn normalize(label: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == label)
            .unwrap_or(WeatherCondition::Clear)
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
