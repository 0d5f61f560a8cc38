//! Plain-text rendering of a `WeatherView`.

use chrono::DateTime;
use weather_core::{ForecastSet, StoreStatus, TemperatureUnit, WeatherSnapshot, WeatherView};

pub fn view(view: &WeatherView) -> String {
    match view.status() {
        StoreStatus::Loading => "Loading...\n".to_string(),
        StoreStatus::Failed => {
            let message = view.error.as_ref().map(|e| e.message.as_str()).unwrap_or_default();
            format!("Error: {message}\n")
        }
        StoreStatus::Idle => "Enter a city name to see weather information\n".to_string(),
        StoreStatus::Ready => {
            let mut out = String::new();
            if let Some(snapshot) = &view.snapshot {
                out.push_str(&current(snapshot, view.unit));
            }
            if let Some(forecast) = view.forecast.as_ref().filter(|f| !f.is_empty()) {
                out.push('\n');
                out.push_str(&forecast_grid(forecast, view.unit));
            }
            out
        }
    }
}

fn current(s: &WeatherSnapshot, unit: TemperatureUnit) -> String {
    let symbol = unit.symbol();
    let mut lines = vec![
        format!("{}, {}", s.city, s.country),
        format!("{}{symbol}  {}", s.temperature, capitalize(&s.description)),
        format!(
            "Humidity {}%  |  Wind {} km/h  |  Visibility {} km  |  Feels like {}{symbol}",
            s.humidity, s.wind_speed, s.visibility, s.feels_like
        ),
    ];

    if let Some(observed) = DateTime::from_timestamp(s.timestamp, 0) {
        lines.push(format!("Observed {}", observed.format("%Y-%m-%d %H:%M UTC")));
    }

    lines.join("\n") + "\n"
}

fn forecast_grid(forecast: &ForecastSet, unit: TemperatureUnit) -> String {
    let symbol = unit.symbol();
    let mut out = String::from("5-Day Forecast\n");

    for day in forecast.days() {
        let range = format!("{}{symbol} / {}{symbol}", day.temperature.max, day.temperature.min);
        out.push_str(&format!("  {:<12} {:<14} {}\n", day.date, range, day.condition));
    }

    out
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
